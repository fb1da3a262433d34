//! The docblock aggregate.
//!
//! A [`DocBlock`] owns one summary line, one free-text description and a
//! [`TagsCollection`].  It is built up incrementally (or from the output
//! of an external comment parser via [`DocBlock::from_parts`]), merged
//! with inherited documentation, and finally rendered to comment text.

use std::fmt;

use ustr::Ustr;

use crate::collection::{AnnotationKey, MergeOutcome, TagsCollection};
use crate::config::RenderOptions;
use crate::error::Result;
use crate::render::render_docblock;
use crate::tags::Tag;

#[derive(Debug, Clone, Default)]
pub struct DocBlock {
    summary: Option<String>,
    description: String,
    tags: TagsCollection,
}

impl DocBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a docblock from already-parsed pieces.
    pub fn from_parts<I>(summary: Option<String>, description: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = Tag>,
    {
        Self {
            summary,
            description: description.into(),
            tags: tags.into_iter().collect(),
        }
    }

    // ─── Summary & description ──────────────────────────────────────────

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Replace the summary; `None` removes it.
    pub fn set_summary(&mut self, summary: Option<&str>) -> &mut Self {
        self.summary = summary.map(str::to_string);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    /// Append a line to the description.
    ///
    /// The line is always preceded by a newline, even when the description
    /// is still empty.
    pub fn add_description(&mut self, line: &str) -> &mut Self {
        self.description.push('\n');
        self.description.push_str(line);
        self
    }

    // ─── Tags ───────────────────────────────────────────────────────────

    pub fn add_tag(&mut self, tag: Tag) -> &mut Self {
        self.tags.add(tag);
        self
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> Vec<&Tag> {
        self.tags.iter().collect()
    }

    /// Tags whose literal name is `name` (no alias resolution).
    pub fn tags_by_name(&self, name: &str) -> Vec<&Tag> {
        self.tags.iter().filter(|tag| tag.name() == name).collect()
    }

    /// Whether at least one tag has the literal name `name`.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name() == name)
    }

    /// Remove the first tag equal to `tag`.  Returns whether one was found.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        match self.tags.position(tag) {
            Some(id) => self.tags.remove(id).is_some(),
            None => false,
        }
    }

    /// Merge tags, skipping those already present.
    ///
    /// See [`TagsCollection::merge`] for the conflict rules.
    pub fn merge_tags<I>(&mut self, tags: I) -> Result<MergeOutcome>
    where
        I: IntoIterator<Item = Tag>,
    {
        self.tags.merge(tags)
    }

    /// Tags grouped by annotation label.  With `sorted`, each group is
    /// ordered with [`crate::sort_tags`].
    pub fn tag_groups(&self, sorted: bool) -> Vec<(AnnotationKey, Vec<&Tag>)> {
        self.tags.grouped_by_annotation(sorted)
    }

    /// Tags grouped by aliased name.
    pub fn tag_groups_by_name(&self, sorted: bool) -> Vec<(Ustr, Vec<&Tag>)> {
        self.tags.grouped_by_name(sorted)
    }

    pub fn tags_collection(&self) -> &TagsCollection {
        &self.tags
    }

    pub fn tags_collection_mut(&mut self) -> &mut TagsCollection {
        &mut self.tags
    }

    /// Replace the whole tag collection, returning the previous one.
    pub fn set_tags_collection(&mut self, tags: TagsCollection) -> TagsCollection {
        std::mem::replace(&mut self.tags, tags)
    }

    // ─── Rendering ──────────────────────────────────────────────────────

    /// Render with the default options (67-column wrap, insertion order,
    /// aligned columns).
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        render_docblock(self.summary(), &self.description, &self.tags, options)
    }
}

impl fmt::Display for DocBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
