//! `@method` parameter descriptors.

use std::fmt;

use crate::error::{DocblockError, Result};
use crate::types::PhpType;

/// A single parameter of a `@method` tag.
///
/// Renders as `type $name[ = default]`.  An argument declared without a
/// type renders as just `$name[ = default]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    arg_type: PhpType,
    default_value: Option<String>,
}

impl Argument {
    /// Create an argument.  The name is given without the `$` prefix; a
    /// leading `$` is tolerated and stripped.
    pub fn new(name: impl Into<String>, arg_type: PhpType) -> Result<Self> {
        let name = name.into();
        let name = match name.strip_prefix('$') {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        if name.trim().is_empty() {
            return Err(DocblockError::EmptyArgumentName);
        }
        Ok(Self {
            name,
            arg_type,
            default_value: None,
        })
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        let default_value = default_value.into();
        let trimmed = default_value.trim();
        self.default_value = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_type(&self) -> &PhpType {
        &self.arg_type
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.arg_type.is_empty() {
            write!(f, "{} ", self.arg_type)?;
        }
        write!(f, "${}", self.name)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}
