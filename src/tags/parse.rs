//! Tag body parsing.
//!
//! Turns the raw text that follows a tag keyword into a structured
//! [`Tag`].  The comment tokenizer that splits a docblock into
//! summary / description / `(name, body)` pairs lives outside this crate;
//! this is the single seam between the two.
//!
//! Supported formats:
//!
//!   - `@param Type $name description` (also `...$rest`, `&$ref`, untyped)
//!   - `@return Type description`
//!   - `@var Type [$name] description`
//!   - `@property[-read|-write] [Type] $name description`
//!   - `@method [static] [ReturnType] [legacy()] name(Type $a, $b = 1) description`
//!   - `@mixin ClassName`
//!
//! Any other keyword becomes a [`TagKind::Generic`] tag.

use tracing::trace;

use super::{
    Argument, MIXIN, MethodTag, PARAM, PROPERTY, PROPERTY_READ, PROPERTY_WRITE, ParamTag,
    PropertyTag, RETURN, Tag, TagKind, VAR, VarTag, normalize_name,
};
use crate::error::{DocblockError, Result};
use crate::types::{PhpType, split_top_level_commas, split_type_token};

impl Tag {
    /// Parse `body` as the contents of an `@name` tag.
    ///
    /// `name` may be given with or without the leading `@`.
    pub fn parse(name: &str, body: &str) -> Result<Tag> {
        let name = normalize_name(name)?;
        let body = body.trim();
        trace!(tag = name, body, "parsing tag body");

        match name {
            PARAM => parse_param(body),
            RETURN => parse_return(body),
            VAR => parse_var(body),
            MIXIN => parse_mixin(body),
            PROPERTY => Ok(TagKind::Property(parse_property(name, body)?).into()),
            PROPERTY_READ => Ok(TagKind::PropertyRead(parse_property(name, body)?).into()),
            PROPERTY_WRITE => Ok(TagKind::PropertyWrite(parse_property(name, body)?).into()),
            super::METHOD => parse_method(body),
            _ => Tag::generic(name, body),
        }
    }
}

// ─── @param / @var / @property ──────────────────────────────────────────────

/// Split a body of the form `[Type] $name rest` into its three parts.
///
/// Returns `None` for the variable when the body carries no `$name`
/// token directly after the type.
fn split_typed_variable(body: &str) -> (&str, Option<&str>, &str) {
    let (type_token, remainder) = if is_variable_token(body) {
        ("", body)
    } else {
        split_type_token(body)
    };

    let remainder = remainder.trim_start();
    match remainder.split_whitespace().next() {
        Some(token) if is_variable_token(token) => {
            let rest = remainder[token.len()..].trim();
            (type_token, Some(token), rest)
        }
        _ => (type_token, None, remainder.trim()),
    }
}

fn is_variable_token(token: &str) -> bool {
    let token = token.trim_start_matches('&').trim_start_matches("...");
    token.starts_with('$')
}

fn parse_param(body: &str) -> Result<Tag> {
    let (type_token, variable, description) = split_typed_variable(body);
    let Some(variable) = variable else {
        return Err(DocblockError::MalformedBody {
            tag: PARAM.to_string(),
            body: body.to_string(),
            reason: "expected a `$name` after the type",
        });
    };

    let is_reference = variable.starts_with('&');
    let unref = variable.trim_start_matches('&');
    let is_variadic = unref.starts_with("...");
    let name = unref.trim_start_matches("...").trim_start_matches('$');
    if name.is_empty() {
        return Err(DocblockError::EmptyVariableName {
            tag: PARAM.to_string(),
        });
    }

    Ok(TagKind::Param(ParamTag {
        param_type: PhpType::new(type_token),
        variable_name: name.to_string(),
        is_variadic,
        is_reference,
        description: description.to_string(),
    })
    .into())
}

fn parse_var(body: &str) -> Result<Tag> {
    if body.is_empty() {
        return Err(DocblockError::MissingBody {
            tag: VAR.to_string(),
        });
    }
    let (type_token, variable, description) = split_typed_variable(body);
    let variable_name = match variable {
        Some(token) => {
            let name = token.trim_start_matches('$');
            if name.is_empty() {
                return Err(DocblockError::EmptyVariableName {
                    tag: VAR.to_string(),
                });
            }
            Some(name.to_string())
        }
        None => None,
    };

    Ok(TagKind::Var(VarTag {
        var_type: PhpType::new(type_token),
        variable_name,
        description: description.to_string(),
    })
    .into())
}

fn parse_property(tag: &str, body: &str) -> Result<PropertyTag> {
    let (type_token, variable, description) = split_typed_variable(body);
    let Some(variable) = variable else {
        return Err(DocblockError::MalformedBody {
            tag: tag.to_string(),
            body: body.to_string(),
            reason: "expected a `$name`",
        });
    };
    let name = variable.trim_start_matches('$');
    if name.is_empty() {
        return Err(DocblockError::EmptyVariableName {
            tag: tag.to_string(),
        });
    }

    Ok(PropertyTag {
        property_type: PhpType::new(type_token),
        variable_name: name.to_string(),
        description: description.to_string(),
    })
}

// ─── @return / @mixin ───────────────────────────────────────────────────────

fn parse_return(body: &str) -> Result<Tag> {
    let (type_token, description) = split_type_token(body);
    Tag::returns(type_token, description)
}

fn parse_mixin(body: &str) -> Result<Tag> {
    // The class name is the first whitespace-delimited token.
    let (type_token, _) = split_type_token(body);
    Tag::mixin(type_token)
}

// ─── @method ────────────────────────────────────────────────────────────────

fn parse_method(body: &str) -> Result<Tag> {
    let malformed = |reason| DocblockError::MalformedBody {
        tag: super::METHOD.to_string(),
        body: body.to_string(),
        reason,
    };

    if body.is_empty() {
        return Err(DocblockError::MissingBody {
            tag: super::METHOD.to_string(),
        });
    }

    // `static` must be followed by whitespace to avoid matching a method
    // literally named "staticFoo" or returning `static`.
    let (is_static, rest) = match body.strip_prefix("static") {
        Some(after) if after.starts_with(char::is_whitespace) => (true, after.trim_start()),
        _ => (false, body),
    };

    let rest = strip_legacy_name(rest);
    let rest = rest.as_str();

    // The signature ends at the first `(`; without one the whole first
    // part of the body is treated as `[ReturnType] name` followed by an
    // optional description.
    let (head, params, description) = match find_signature_paren(rest) {
        Some(open) => {
            let after = &rest[open + 1..];
            let close = find_matching_paren(after).ok_or_else(|| malformed("unclosed `(`"))?;
            (&rest[..open], Some(&after[..close]), after[close + 1..].trim())
        }
        None => {
            let mut tokens = rest.splitn(3, char::is_whitespace);
            let first = tokens.next().unwrap_or_default();
            match tokens.next() {
                Some(second) if !second.is_empty() => {
                    let head_len = first.len() + 1 + second.len();
                    (&rest[..head_len], None, rest[head_len..].trim())
                }
                _ => (first, None, ""),
            }
        }
    };

    let mut words: Vec<&str> = head.split_whitespace().collect();
    let method_name = words.pop().ok_or(DocblockError::EmptyMethodName)?;
    if !method_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '\\' || c == '|')
    {
        return Err(malformed("invalid method name"));
    }
    let return_type = if words.is_empty() {
        None
    } else {
        Some(PhpType::new(words.join(" ")))
    };

    let arguments = match params {
        Some(params) if !params.trim().is_empty() => parse_method_arguments(params)?,
        _ => Vec::new(),
    };

    let method = MethodTag::new(method_name, arguments, return_type, is_static, description)?;
    Ok(method.into())
}

/// Drop a legacy `name()` token that precedes the real signature, as in
/// `string getName() getName(int $id)`.
fn strip_legacy_name(s: &str) -> String {
    let mut search_from = 0;
    while let Some(rel) = s[search_from..].find("()") {
        let pos = search_from + rel;
        let start = s[..pos]
            .rfind(char::is_whitespace)
            .map(|p| p + 1)
            .unwrap_or(0);
        let word = &s[start..pos];
        let tail = &s[pos + 2..];
        let after = tail.trim_start();
        let followed_by_signature = tail.starts_with(char::is_whitespace)
            && after
                .split_whitespace()
                .next()
                .is_some_and(|w| w.contains('(') && !w.starts_with('('));
        if !word.is_empty()
            && word.chars().all(|c| c.is_alphanumeric() || c == '_')
            && followed_by_signature
        {
            return format!("{}{}", &s[..start], after);
        }
        search_from = pos + 2;
    }
    s.to_string()
}

/// Position of the `(` opening the parameter list, skipping parentheses
/// that belong to a callable return type such as `callable(int): mixed`.
fn find_signature_paren(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '{' | '[' => depth += 1,
            '>' | '}' | ']' => depth -= 1,
            '(' if depth == 0 => {
                let before = s[..i].trim_end();
                let word_start = before
                    .rfind(char::is_whitespace)
                    .map(|p| p + 1)
                    .unwrap_or(0);
                let word = before[word_start..].trim_start_matches('\\');
                let is_callable_type =
                    word.eq_ignore_ascii_case("callable") || word.eq_ignore_ascii_case("Closure");
                if !is_callable_type && !word.is_empty() {
                    return Some(i);
                }
                depth += 1;
            }
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn find_matching_paren(after_open: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in after_open.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Parse the parameter list of a `@method` tag.
///
/// Handles formats like:
///   - `string $abstract, callable():mixed $mockDefinition = null`
///   - `array<string, mixed> $data, string $connection = null`
///   - `...$values`, `$untyped`
fn parse_method_arguments(params: &str) -> Result<Vec<Argument>> {
    let mut arguments = Vec::new();

    for part in split_top_level_commas(params) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (declaration, default_value) = match part.split_once('=') {
            Some((decl, default)) => (decl.trim(), Some(default.trim())),
            None => (part, None),
        };

        let Some(dollar) = declaration.rfind('$') else {
            return Err(DocblockError::MalformedBody {
                tag: super::METHOD.to_string(),
                body: params.to_string(),
                reason: "argument without a `$name`",
            });
        };
        let name = &declaration[dollar + 1..];
        let type_str = declaration[..dollar]
            .trim()
            .trim_end_matches('&')
            .trim_end_matches("...")
            .trim();

        let mut argument = Argument::new(name, PhpType::new(type_str))?;
        if let Some(default_value) = default_value {
            argument = argument.with_default(default_value);
        }
        arguments.push(argument);
    }

    Ok(arguments)
}
