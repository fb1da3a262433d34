//! Data-driven rendering tests.
//!
//! Every `tests/fixtures/*.toml` file describes a docblock as an external
//! comment parser would hand it over (summary, description lines, raw
//! `name`/`body` tag pairs), optionally a set of tags to merge in and
//! render options, plus the exact expected output.

mod common;

use std::fs;
use std::path::Path;

use phpdoc_generator::{DocBlock, RenderOptions, Tag};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Fixture {
    summary: Option<String>,
    #[serde(default)]
    description: Vec<String>,
    #[serde(default)]
    tags: Vec<FixtureTag>,
    #[serde(default)]
    merge: Vec<FixtureTag>,
    #[serde(default)]
    render: RenderOptions,
    expected: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixtureTag {
    name: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    annotations: Vec<String>,
}

impl FixtureTag {
    fn build(&self) -> phpdoc_generator::Result<Tag> {
        let mut tag = Tag::parse(&self.name, &self.body)?;
        tag.set_annotations(self.annotations.clone());
        Ok(tag)
    }
}

fn render_fixture(path: &Path) -> datatest_stable::Result<()> {
    common::init_tracing();
    let source = fs::read_to_string(path)?;
    let fixture: Fixture = toml::from_str(&source)?;

    let mut doc = DocBlock::new();
    doc.set_summary(fixture.summary.as_deref());
    let mut lines = fixture.description.iter();
    if let Some(first) = lines.next() {
        doc.set_description(first.as_str());
    }
    for line in lines {
        doc.add_description(line);
    }
    for raw in &fixture.tags {
        doc.add_tag(raw.build()?);
    }
    if !fixture.merge.is_empty() {
        let incoming = fixture
            .merge
            .iter()
            .map(FixtureTag::build)
            .collect::<phpdoc_generator::Result<Vec<_>>>()?;
        doc.merge_tags(incoming)?;
    }

    let rendered = doc.render_with(&fixture.render);
    if rendered != fixture.expected {
        return Err(format!(
            "{}: rendering mismatch\n--- expected\n{}\n--- actual\n{}",
            path.display(),
            fixture.expected,
            rendered
        )
        .into());
    }
    Ok(())
}

datatest_stable::harness! {
    { test = render_fixture, root = "tests/fixtures", pattern = r"\.toml$" },
}
