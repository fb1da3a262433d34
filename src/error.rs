//! Error taxonomy for tag construction, merging and configuration.
//!
//! Rendering never fails, so nothing in [`crate::render`] returns these.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = DocblockError> = std::result::Result<T, E>;

/// Everything that can go wrong while building or merging docblocks.
#[derive(Debug, Error)]
pub enum DocblockError {
    /// Two property tags describe the same variable with different types.
    #[error("mismatched types for ${variable}: already had {existing} and was given {incoming}")]
    TypeConflict {
        variable: String,
        existing: String,
        incoming: String,
    },

    /// More than one existing tag matched an incoming tag during a merge.
    #[error("multiple matching tags found that matched {name} ({matches} candidates)")]
    AmbiguousMerge { name: String, matches: usize },

    #[error("invalid tag name {0:?}")]
    InvalidTagName(String),

    #[error("method tag requires a method name")]
    EmptyMethodName,

    #[error("argument requires a name")]
    EmptyArgumentName,

    #[error("@{tag} requires a variable name")]
    EmptyVariableName { tag: String },

    #[error("@{tag} requires a body")]
    MissingBody { tag: String },

    #[error("malformed @{tag} body {body:?}: {reason}")]
    MalformedBody {
        tag: String,
        body: String,
        reason: &'static str,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidConfig(&'static str),
}
