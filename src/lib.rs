//! Build, merge and render PHPDoc blocks.
//!
//! A [`DocBlock`] is a summary line, a free-text description and an
//! ordered [`TagsCollection`].  The collection indexes its tags by
//! (aliased) name and by annotation label, finds tags that describe the
//! same property or method, and merges incoming tags without duplicating
//! declarations.  Rendering wraps the description at 67 columns, groups
//! same-name tags into blocks and aligns their columns:
//!
//! ```
//! use phpdoc_generator::{DocBlock, Tag};
//!
//! let mut doc = DocBlock::new();
//! doc.set_summary(Some("Greets people."));
//! doc.add_tag(Tag::param("string", "name", "Who to greet.").unwrap());
//! doc.add_tag(Tag::param("int", "times", "How often.").unwrap());
//!
//! assert_eq!(
//!     doc.render(),
//!     "/**\n * Greets people.\n *\n * @param string $name  Who to greet.\n * @param int    $times How often.\n */"
//! );
//! ```
//!
//! Parsing comment syntax is left to the caller; [`Tag::parse`] turns an
//! already-split `(name, body)` pair into a structured tag.

pub mod collection;
pub mod config;
pub mod docblock;
pub mod error;
pub mod render;
pub mod tags;
pub mod types;

pub use collection::{
    AnnotationKey, MergeOutcome, TAG_ALIASES, TagId, TagsCollection, de_alias, sort_tags,
};
pub use config::{Config, RenderOptions};
pub use docblock::DocBlock;
pub use error::{DocblockError, Result};
pub use tags::{Argument, MethodTag, Tag, TagKind};
pub use types::PhpType;
