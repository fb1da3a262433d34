//! Merging incoming tags into an existing collection.
//!
//! Used to combine inherited or mixed-in documentation with locally
//! declared documentation without declaring the same property or method
//! twice.  For every incoming tag:
//!
//!   - no match → the tag is appended;
//!   - one match → the tag is already present and is dropped, unless both
//!     are property tags whose types render differently, which is a
//!     [`DocblockError::TypeConflict`];
//!   - several matches → [`DocblockError::AmbiguousMerge`], since the
//!     collection already holds declarations the match predicate cannot
//!     tell apart.
//!
//! The first error aborts the merge.  Tags accepted before it stay in the
//! collection.

use tracing::debug;

use super::{TagId, TagsCollection};
use crate::error::{DocblockError, Result};
use crate::tags::Tag;

/// What a successful merge did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Handles of the tags that were appended.
    pub added: Vec<TagId>,
    /// Number of incoming tags that were already present.
    pub kept: usize,
}

impl TagsCollection {
    /// Merge `incoming` into this collection.
    pub fn merge<I>(&mut self, incoming: I) -> Result<MergeOutcome>
    where
        I: IntoIterator<Item = Tag>,
    {
        let mut outcome = MergeOutcome::default();

        for tag in incoming {
            let matches = self.find_matching_ids(&tag);
            match matches.as_slice() {
                [] => {
                    debug!(tag = tag.name(), "merge: appending new tag");
                    outcome.added.push(self.add(tag));
                }
                [existing] => {
                    if let Some(existing) = self.get(*existing) {
                        check_types(existing, &tag)?;
                    }
                    debug!(tag = tag.name(), "merge: already present, keeping existing");
                    outcome.kept += 1;
                }
                _ => {
                    debug!(tag = tag.name(), matches = matches.len(), "merge: ambiguous");
                    return Err(DocblockError::AmbiguousMerge {
                        name: tag.name().to_string(),
                        matches: matches.len(),
                    });
                }
            }
        }

        Ok(outcome)
    }
}

/// Property tags describing the same variable must agree on its type.
fn check_types(existing: &Tag, incoming: &Tag) -> Result<()> {
    let (Some(had), Some(given)) = (existing.as_property(), incoming.as_property()) else {
        return Ok(());
    };
    if had.property_type.as_str() == given.property_type.as_str() {
        return Ok(());
    }
    debug!(
        variable = %given.variable_name,
        existing = %had.property_type,
        incoming = %given.property_type,
        "merge: type conflict"
    );
    Err(DocblockError::TypeConflict {
        variable: given.variable_name.clone(),
        existing: had.property_type.to_string(),
        incoming: given.property_type.to_string(),
    })
}
