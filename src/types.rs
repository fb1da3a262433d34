//! PHPDoc type values and type-token scanning.
//!
//! A [`PhpType`] is treated as an opaque, renderable value: the crate never
//! resolves or normalises it beyond trimming surrounding whitespace.  Two
//! types are "the same" exactly when their renderings are textually equal,
//! which is what merge conflict detection relies on.

use std::fmt;

/// The implicit return type of a `@method` tag that omits one.
pub const VOID: &str = "void";

/// A type expression as written in a docblock (e.g. `int`, `?Foo`,
/// `array<string, User>`, `\App\Models\User|null`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhpType(String);

impl PhpType {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn void() -> Self {
        Self(VOID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PhpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhpType {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PhpType {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Split off the first type token from `s`, respecting `<…>`, `{…}` and
/// `(…)` nesting.
///
/// Returns `(type_token, remainder)` where `type_token` is the full type
/// (e.g. `array{id: int, name: string}` or `Collection<int, User>`) and
/// `remainder` is whatever follows, leading whitespace included.
///
/// A callable type keeps its `:ReturnType` suffix attached, so
/// `callable(int): mixed $cb` yields `callable(int): mixed`.
pub(crate) fn split_type_token(s: &str) -> (&str, &str) {
    let mut depth = 0i32;
    let mut after_close_paren = false;
    let mut iter = s.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        match c {
            '<' | '{' | '(' | '[' => depth += 1,
            '>' | '}' | ']' => depth -= 1,
            ')' => {
                depth -= 1;
                after_close_paren = depth == 0;
                continue;
            }
            ':' if depth == 0 && after_close_paren => {
                // Swallow the whitespace between `:` and the return type.
                while let Some(&(_, next)) = iter.peek() {
                    if next.is_whitespace() {
                        iter.next();
                    } else {
                        break;
                    }
                }
            }
            c if c.is_whitespace() && depth <= 0 => {
                return (&s[..i], &s[i..]);
            }
            _ => {}
        }
        after_close_paren = false;
    }
    (s, "")
}

/// Split `s` on commas that are not nested inside `<>`, `{}`, `()` or `[]`.
///
/// Used for `@method` parameter lists so that `array<string, mixed>` is
/// not torn apart.
pub(crate) fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, ch) in s.char_indices() {
        match ch {
            '<' | '{' | '(' | '[' => depth += 1,
            '>' | '}' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
