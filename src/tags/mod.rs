//! The tag model.
//!
//! A [`Tag`] is one annotation line of a docblock (`@param`, `@method`,
//! `@property-read`, …).  The variant is a closed sum type
//! ([`TagKind`]); every operation that cares about the variant (matching,
//! sorting, merging, rendering) is an exhaustive `match` over it.
//!
//! Every tag also carries a list of free-form *annotation labels*.  They
//! are unrelated to the tag name and only drive the secondary
//! by-annotation index of [`crate::TagsCollection`].
//!
//! # Submodules
//!
//! - [`argument`]: `@method` parameter descriptors.
//! - [`parse`]: raw tag body → structured [`Tag`].

pub mod argument;
mod parse;

use std::fmt;

use crate::error::{DocblockError, Result};
use crate::types::PhpType;

pub use argument::Argument;

// ─── Tag names ──────────────────────────────────────────────────────────────

pub const PARAM: &str = "param";
pub const RETURN: &str = "return";
pub const VAR: &str = "var";
pub const METHOD: &str = "method";
pub const MIXIN: &str = "mixin";
pub const PROPERTY: &str = "property";
pub const PROPERTY_READ: &str = "property-read";
pub const PROPERTY_WRITE: &str = "property-write";

/// Strip an optional leading `@` and validate the remaining keyword.
///
/// Tag names consist of ASCII alphanumerics, `_`, `-`, `:` and `\`
/// (the latter two appear in vendor tags like `@ORM\Column` or
/// `@phpstan:ignore`).
pub(crate) fn normalize_name(raw: &str) -> Result<&str> {
    let name = raw.trim();
    let name = name.strip_prefix('@').unwrap_or(name);
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '\\'));
    if valid {
        Ok(name)
    } else {
        Err(DocblockError::InvalidTagName(raw.to_string()))
    }
}

// ─── Payloads ───────────────────────────────────────────────────────────────

/// Any tag without dedicated structure: `@author`, `@since`, `@see`, …
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericTag {
    name: String,
    body: String,
}

impl GenericTag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// `@param Type $name description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    pub param_type: PhpType,
    pub variable_name: String,
    pub is_variadic: bool,
    pub is_reference: bool,
    pub description: String,
}

impl ParamTag {
    /// The variable token as written, e.g. `&...$items`.
    pub fn variable_token(&self) -> String {
        let mut out = String::with_capacity(self.variable_name.len() + 5);
        if self.is_reference {
            out.push('&');
        }
        if self.is_variadic {
            out.push_str("...");
        }
        out.push('$');
        out.push_str(&self.variable_name);
        out
    }
}

/// `@return Type description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnTag {
    pub return_type: PhpType,
    pub description: String,
}

/// `@var Type [$name] description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTag {
    pub var_type: PhpType,
    pub variable_name: Option<String>,
    pub description: String,
}

/// `@method [static] ReturnType name(Type $arg, …) description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTag {
    method_name: String,
    arguments: Vec<Argument>,
    return_type: PhpType,
    is_static: bool,
    description: String,
}

impl MethodTag {
    /// Build a method tag.  A missing (or empty) return type defaults to
    /// `void`.
    pub fn new(
        method_name: impl Into<String>,
        arguments: Vec<Argument>,
        return_type: Option<PhpType>,
        is_static: bool,
        description: impl Into<String>,
    ) -> Result<Self> {
        let method_name = method_name.into().trim().to_string();
        if method_name.is_empty() {
            return Err(DocblockError::EmptyMethodName);
        }
        let return_type = match return_type {
            Some(t) if !t.is_empty() => t,
            _ => PhpType::void(),
        };
        Ok(Self {
            method_name,
            arguments,
            return_type,
            is_static,
            description: description.into().trim().to_string(),
        })
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn return_type(&self) -> &PhpType {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for MethodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        write!(f, "{} {}(", self.return_type, self.method_name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// `@mixin ClassName`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinTag {
    pub mixin_type: PhpType,
}

/// Payload shared by `@property`, `@property-read` and `@property-write`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTag {
    pub property_type: PhpType,
    pub variable_name: String,
    pub description: String,
}

// ─── Tag ────────────────────────────────────────────────────────────────────

/// The closed set of tag variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagKind {
    Generic(GenericTag),
    Param(ParamTag),
    Return(ReturnTag),
    Var(VarTag),
    Method(MethodTag),
    Mixin(MixinTag),
    Property(PropertyTag),
    PropertyRead(PropertyTag),
    PropertyWrite(PropertyTag),
}

/// One annotation of a docblock plus its free-form annotation labels.
///
/// The variant (and therefore the name) is fixed at construction; only
/// the labels can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    kind: TagKind,
    annotations: Vec<String>,
}

impl From<TagKind> for Tag {
    fn from(kind: TagKind) -> Self {
        Self {
            kind,
            annotations: Vec::new(),
        }
    }
}

impl From<MethodTag> for Tag {
    fn from(method: MethodTag) -> Self {
        TagKind::Method(method).into()
    }
}

impl Tag {
    /// A tag without dedicated structure, rendered as `@name body`.
    pub fn generic(name: &str, body: impl Into<String>) -> Result<Self> {
        let name = normalize_name(name)?.to_string();
        Ok(TagKind::Generic(GenericTag {
            name,
            body: body.into().trim().to_string(),
        })
        .into())
    }

    pub fn param(
        param_type: impl Into<PhpType>,
        variable_name: &str,
        description: impl Into<String>,
    ) -> Result<Self> {
        let variable_name = variable_name_of(PARAM, variable_name)?;
        Ok(TagKind::Param(ParamTag {
            param_type: param_type.into(),
            variable_name,
            is_variadic: false,
            is_reference: false,
            description: description.into().trim().to_string(),
        })
        .into())
    }

    pub fn returns(return_type: impl Into<PhpType>, description: impl Into<String>) -> Result<Self> {
        let return_type = return_type.into();
        if return_type.is_empty() {
            return Err(DocblockError::MissingBody {
                tag: RETURN.to_string(),
            });
        }
        Ok(TagKind::Return(ReturnTag {
            return_type,
            description: description.into().trim().to_string(),
        })
        .into())
    }

    pub fn var(
        var_type: impl Into<PhpType>,
        variable_name: Option<&str>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let variable_name = variable_name
            .map(|name| variable_name_of(VAR, name))
            .transpose()?;
        Ok(TagKind::Var(VarTag {
            var_type: var_type.into(),
            variable_name,
            description: description.into().trim().to_string(),
        })
        .into())
    }

    pub fn mixin(mixin_type: impl Into<PhpType>) -> Result<Self> {
        let mixin_type = mixin_type.into();
        if mixin_type.is_empty() {
            return Err(DocblockError::MissingBody {
                tag: MIXIN.to_string(),
            });
        }
        Ok(TagKind::Mixin(MixinTag { mixin_type }).into())
    }

    pub fn property(
        property_type: impl Into<PhpType>,
        variable_name: &str,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(TagKind::Property(property_payload(
            PROPERTY,
            property_type.into(),
            variable_name,
            description.into(),
        )?)
        .into())
    }

    pub fn property_read(
        property_type: impl Into<PhpType>,
        variable_name: &str,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(TagKind::PropertyRead(property_payload(
            PROPERTY_READ,
            property_type.into(),
            variable_name,
            description.into(),
        )?)
        .into())
    }

    pub fn property_write(
        property_type: impl Into<PhpType>,
        variable_name: &str,
        description: impl Into<String>,
    ) -> Result<Self> {
        Ok(TagKind::PropertyWrite(property_payload(
            PROPERTY_WRITE,
            property_type.into(),
            variable_name,
            description.into(),
        )?)
        .into())
    }

    pub fn kind(&self) -> &TagKind {
        &self.kind
    }

    /// The literal tag keyword, without the `@`.
    pub fn name(&self) -> &str {
        match &self.kind {
            TagKind::Generic(tag) => &tag.name,
            TagKind::Param(_) => PARAM,
            TagKind::Return(_) => RETURN,
            TagKind::Var(_) => VAR,
            TagKind::Method(_) => METHOD,
            TagKind::Mixin(_) => MIXIN,
            TagKind::Property(_) => PROPERTY,
            TagKind::PropertyRead(_) => PROPERTY_READ,
            TagKind::PropertyWrite(_) => PROPERTY_WRITE,
        }
    }

    /// The property payload when this is `@property`, `@property-read`
    /// or `@property-write`.
    pub fn as_property(&self) -> Option<&PropertyTag> {
        match &self.kind {
            TagKind::Property(p) | TagKind::PropertyRead(p) | TagKind::PropertyWrite(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodTag> {
        match &self.kind {
            TagKind::Method(m) => Some(m),
            _ => None,
        }
    }

    /// The variable a tag documents, for the variants that have one.
    pub fn variable_name(&self) -> Option<&str> {
        match &self.kind {
            TagKind::Param(p) => Some(&p.variable_name),
            TagKind::Var(v) => v.variable_name.as_deref(),
            TagKind::Property(p) | TagKind::PropertyRead(p) | TagKind::PropertyWrite(p) => {
                Some(&p.variable_name)
            }
            TagKind::Generic(_) | TagKind::Return(_) | TagKind::Method(_) | TagKind::Mixin(_) => {
                None
            }
        }
    }

    /// The declared type, for the variants that have one.
    pub fn declared_type(&self) -> Option<&PhpType> {
        match &self.kind {
            TagKind::Param(p) => Some(&p.param_type),
            TagKind::Return(r) => Some(&r.return_type),
            TagKind::Var(v) => Some(&v.var_type),
            TagKind::Mixin(m) => Some(&m.mixin_type),
            TagKind::Property(p) | TagKind::PropertyRead(p) | TagKind::PropertyWrite(p) => {
                Some(&p.property_type)
            }
            TagKind::Generic(_) => None,
            TagKind::Method(m) => Some(&m.return_type),
        }
    }

    /// Everything after the `@name` keyword.
    pub fn body(&self) -> String {
        match &self.kind {
            TagKind::Generic(tag) => tag.body.clone(),
            TagKind::Param(p) => join_words(&[
                p.param_type.as_str(),
                &p.variable_token(),
                &p.description,
            ]),
            TagKind::Return(r) => join_words(&[r.return_type.as_str(), &r.description]),
            TagKind::Var(v) => {
                let variable = v
                    .variable_name
                    .as_ref()
                    .map(|name| format!("${name}"))
                    .unwrap_or_default();
                join_words(&[v.var_type.as_str(), &variable, &v.description])
            }
            TagKind::Method(m) => m.to_string(),
            TagKind::Mixin(m) => m.mixin_type.to_string(),
            TagKind::Property(p) | TagKind::PropertyRead(p) | TagKind::PropertyWrite(p) => {
                join_words(&[
                    p.property_type.as_str(),
                    &format!("${}", p.variable_name),
                    &p.description,
                ])
            }
        }
    }

    // ─── Annotation labels ──────────────────────────────────────────────

    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn add_annotation(&mut self, annotation: impl Into<String>) -> &mut Self {
        self.annotations.push(annotation.into());
        self
    }

    pub fn set_annotations(&mut self, annotations: Vec<String>) -> &mut Self {
        self.annotations = annotations;
        self
    }

    /// Builder-style [`Tag::add_annotation`].
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        if body.is_empty() {
            write!(f, "@{}", self.name())
        } else {
            write!(f, "@{} {}", self.name(), body)
        }
    }
}

// ─── Internal Helpers ───────────────────────────────────────────────────────

fn variable_name_of(tag: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    let name = name.strip_prefix('$').unwrap_or(name);
    if name.is_empty() {
        return Err(DocblockError::EmptyVariableName {
            tag: tag.to_string(),
        });
    }
    Ok(name.to_string())
}

fn property_payload(
    tag: &str,
    property_type: PhpType,
    variable_name: &str,
    description: String,
) -> Result<PropertyTag> {
    Ok(PropertyTag {
        property_type,
        variable_name: variable_name_of(tag, variable_name)?,
        description: description.trim().to_string(),
    })
}

/// Join non-empty words with single spaces.
fn join_words(words: &[&str]) -> String {
    let mut out = String::new();
    for word in words.iter().filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
