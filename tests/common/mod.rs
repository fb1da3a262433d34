#![allow(dead_code)]

use phpdoc_generator::Tag;

/// Install a test subscriber honouring `RUST_LOG`.  Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Parse a tag, panicking on malformed input.
pub fn tag(name: &str, body: &str) -> Tag {
    Tag::parse(name, body).unwrap_or_else(|e| panic!("failed to parse @{name} {body}: {e}"))
}

/// Variable names of property-like tags, in order.
pub fn variables(tags: &[&Tag]) -> Vec<String> {
    tags.iter()
        .map(|t| t.variable_name().unwrap_or_default().to_string())
        .collect()
}
