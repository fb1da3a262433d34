//! Tests for merging incoming tags into a collection.

mod common;

use common::{init_tracing, tag, variables};
use phpdoc_generator::{DocblockError, TagsCollection};

#[test]
fn unmatched_tags_are_appended() {
    init_tracing();
    let mut tags = TagsCollection::new();
    tags.add(tag("property", "int $id"));

    let outcome = tags
        .merge([tag("property", "string $name"), tag("mixin", "Builder")])
        .unwrap();

    assert_eq!(outcome.added.len(), 2);
    assert_eq!(outcome.kept, 0);
    assert_eq!(tags.len(), 3);
    assert_eq!(variables(&tags.by_name("property")), vec!["id", "name"]);
}

#[test]
fn matching_property_with_equal_type_is_kept_once() {
    init_tracing();
    let mut tags = TagsCollection::new();
    tags.add(tag("property", "int $id The local one."));

    let outcome = tags.merge([tag("property", "int $id Inherited.")]).unwrap();

    assert!(outcome.added.is_empty());
    assert_eq!(outcome.kept, 1);
    assert_eq!(tags.len(), 1);
    // The existing tag wins.
    let kept = tags.by_name("property");
    assert_eq!(
        kept[0].as_property().map(|p| p.description.as_str()),
        Some("The local one.")
    );
}

#[test]
fn mismatched_property_types_conflict() {
    init_tracing();
    let mut tags = TagsCollection::new();
    tags.add(tag("property", "string $x"));

    let err = tags.merge([tag("property", "int $x")]).unwrap_err();
    match &err {
        DocblockError::TypeConflict {
            variable,
            existing,
            incoming,
        } => {
            assert_eq!(variable, "x");
            assert_eq!(existing, "string");
            assert_eq!(incoming, "int");
        }
        other => panic!("expected TypeConflict, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("$x"), "message: {message}");
    assert!(message.contains("string"), "message: {message}");
    assert!(message.contains("int"), "message: {message}");
    assert_eq!(tags.len(), 1);
}

#[test]
fn ambiguous_match_is_an_error() {
    init_tracing();
    let mut tags = TagsCollection::new();
    tags.add(tag("since", "1.0"));
    tags.add(tag("since", "1.1"));

    let err = tags.merge([tag("since", "2.0")]).unwrap_err();
    match err {
        DocblockError::AmbiguousMerge { name, matches } => {
            assert_eq!(name, "since");
            assert_eq!(matches, 2);
        }
        other => panic!("expected AmbiguousMerge, got {other:?}"),
    }
    assert_eq!(tags.len(), 2);
}

#[test]
fn duplicated_property_declarations_make_merge_ambiguous() {
    let mut tags = TagsCollection::new();
    tags.add(tag("property", "int $id"));
    tags.add(tag("property", "int $id"));

    assert!(matches!(
        tags.merge([tag("property", "int $id")]),
        Err(DocblockError::AmbiguousMerge { .. })
    ));
}

#[test]
fn plain_property_is_appended_next_to_read_and_write_variants() {
    init_tracing();
    let mut tags = TagsCollection::new();
    tags.add(tag("property-read", "int $count"));
    tags.add(tag("property-write", "int $count"));

    // Matching compares literal names, so neither variant matches a plain
    // `@property` and the collection grows instead of staying at two.
    // Collapsing it would need both variants to match, which is ambiguous.
    let outcome = tags.merge([tag("property", "int $count")]).unwrap();
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(tags.len(), 3);

    // Merging the same set again changes nothing.
    let again = tags
        .merge([
            tag("property-read", "int $count"),
            tag("property-write", "int $count"),
            tag("property", "int $count"),
        ])
        .unwrap();
    assert!(again.added.is_empty());
    assert_eq!(again.kept, 3);
    assert_eq!(tags.len(), 3);
}

#[test]
fn methods_merge_by_method_name() {
    let mut tags = TagsCollection::new();
    tags.add(tag("method", "static Builder query()"));

    let outcome = tags
        .merge([
            tag("method", "static Builder query()"),
            tag("method", "static self make(array $attributes = [])"),
        ])
        .unwrap();
    assert_eq!(outcome.kept, 1);
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(tags.len(), 2);
}

#[test]
fn params_merge_by_variable_name() {
    let mut tags = TagsCollection::new();
    tags.add(tag("param", "int $a"));
    tags.add(tag("param", "int $b"));

    let outcome = tags
        .merge([tag("param", "int $b"), tag("param", "int $c")])
        .unwrap();
    assert_eq!(outcome.kept, 1);
    assert_eq!(variables(&tags.by_name("param")), vec!["a", "b", "c"]);
}

#[test]
fn unnamed_var_matches_a_named_one() {
    let mut tags = TagsCollection::new();
    tags.add(tag("var", "int $x"));

    let outcome = tags.merge([tag("var", "string")]).unwrap();
    assert_eq!(outcome.kept, 1);
    assert!(outcome.added.is_empty());
    assert_eq!(tags.len(), 1);

    let outcome = tags.merge([tag("var", "int $y")]).unwrap();
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(tags.len(), 2);
}

#[test]
fn first_error_aborts_but_keeps_earlier_additions() {
    let mut tags = TagsCollection::new();
    tags.add(tag("property", "string $x"));

    let result = tags.merge([
        tag("property", "int $y"),
        tag("property", "int $x"),
        tag("property", "int $z"),
    ]);
    assert!(matches!(result, Err(DocblockError::TypeConflict { .. })));
    assert_eq!(variables(&tags.by_name("property")), vec!["x", "y"]);
}
