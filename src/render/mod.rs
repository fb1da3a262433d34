//! Docblock rendering.
//!
//! Produces the final comment text:
//!
//! ```text
//! /**
//!  * Summary line.
//!  *
//!  * Description, word-wrapped at 67 columns.
//!  *
//!  * @author Someone <someone@example.com>
//!  *
//!  * @param int    $a First.
//!  * @param string $b Second.
//!  */
//! ```
//!
//! Tags are emitted in collection order.  Every time the aliased tag name
//! changes a blank ` *` line is inserted, so same-name tags form a
//! contiguous block whose columns are aligned by [`align`].  An empty
//! docblock renders as `/** */`.
//!
//! # Submodules
//!
//! - [`align`]: column-aligned tag formatting.
//! - [`wrap`]: whitespace-only word wrapping.

mod align;
mod wrap;

use tracing::trace;

use crate::collection::{TagsCollection, de_alias};
use crate::config::RenderOptions;
use crate::tags::Tag;

pub use wrap::wrap;

/// Rendering of a docblock without any content.
pub const EMPTY_DOCBLOCK: &str = "/** */";

/// Render a full docblock.
pub fn render_docblock(
    summary: Option<&str>,
    description: &str,
    tags: &TagsCollection,
    options: &RenderOptions,
) -> String {
    trace!(tags = tags.len(), ?options, "rendering docblock");

    let mut lines = header_lines(summary.unwrap_or_default(), description, options.wrap_width);

    let ordered: Vec<&Tag> = if options.sort_tags {
        tags.sorted()
    } else {
        tags.iter().collect()
    };

    for group in contiguous_groups(&ordered) {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        let formatted = if options.align_columns {
            align::format_group(group)
        } else {
            align::format_plain(group)
        };
        for text in formatted {
            lines.extend(text.lines().map(|line| line.trim_end().to_string()));
        }
    }

    frame(&lines)
}

/// Summary, blank line, wrapped description, trimmed as a whole.
fn header_lines(summary: &str, description: &str, width: usize) -> Vec<String> {
    let raw = format!("{}\n\n{}", summary, wrap(description, width));
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.lines().map(|line| line.trim_end().to_string()).collect()
}

/// Split tags into maximal runs sharing the same aliased name.
fn contiguous_groups<'t, 'a>(tags: &'t [&'a Tag]) -> Vec<&'t [&'a Tag]> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=tags.len() {
        let boundary = i == tags.len() || de_alias(tags[i].name()) != de_alias(tags[start].name());
        if boundary && start < i {
            groups.push(&tags[start..i]);
            start = i;
        }
    }
    groups
}

/// Wrap content lines in `/** … */` with ` * ` continuation markers.
fn frame(lines: &[String]) -> String {
    let first = lines.iter().position(|line| !line.is_empty());
    let last = lines.iter().rposition(|line| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return EMPTY_DOCBLOCK.to_string();
    };

    let mut out = String::from("/**\n");
    for line in &lines[first..=last] {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */");
    out
}
