//! Column-aligned tag formatting.
//!
//! Within a group every tag is split into up to four columns:
//!
//! ```text
//! @param int    $example  This is an example.
//! @param string $example2 This is a second example.
//! ^keyword ^type  ^variable ^description
//! ```
//!
//! Each column is padded to the widest entry of the group so that the
//! descriptions start at a common column.  Tags without type or variable
//! structure (`@author`, `@method`, `@mixin`, …) only get the keyword
//! column padded.

use crate::tags::{Tag, TagKind};

/// A tag split into alignable columns.
#[derive(Debug)]
struct Columns {
    keyword: String,
    type_col: Option<String>,
    variable: Option<String>,
    rest: String,
}

impl Columns {
    fn of(tag: &Tag) -> Self {
        let keyword = format!("@{}", tag.name());
        let (type_col, variable, rest) = match tag.kind() {
            TagKind::Param(p) => (
                Some(p.param_type.to_string()),
                Some(p.variable_token()),
                p.description.clone(),
            ),
            TagKind::Return(r) => (Some(r.return_type.to_string()), None, r.description.clone()),
            TagKind::Var(v) => (
                Some(v.var_type.to_string()),
                Some(
                    v.variable_name
                        .as_ref()
                        .map(|name| format!("${name}"))
                        .unwrap_or_default(),
                ),
                v.description.clone(),
            ),
            TagKind::Property(p) | TagKind::PropertyRead(p) | TagKind::PropertyWrite(p) => (
                Some(p.property_type.to_string()),
                Some(format!("${}", p.variable_name)),
                p.description.clone(),
            ),
            TagKind::Generic(_) | TagKind::Method(_) | TagKind::Mixin(_) => {
                (None, None, tag.body())
            }
        };
        Self {
            keyword,
            type_col,
            variable,
            rest,
        }
    }
}

/// Format one group of tags with aligned columns, one string per tag.
pub(crate) fn format_group(tags: &[&Tag]) -> Vec<String> {
    let columns: Vec<Columns> = tags.iter().map(|tag| Columns::of(tag)).collect();

    let keyword_width = max_width(columns.iter().map(|c| Some(c.keyword.as_str())));
    let type_width = max_width(columns.iter().map(|c| c.type_col.as_deref()));
    let variable_width = max_width(columns.iter().map(|c| c.variable.as_deref()));

    columns
        .iter()
        .map(|c| {
            let mut line = format!("{:<keyword_width$}", c.keyword);
            if let Some(type_col) = &c.type_col {
                if type_width > 0 {
                    line.push(' ');
                    line.push_str(&format!("{type_col:<type_width$}"));
                }
                if variable_width > 0 {
                    let variable = c.variable.as_deref().unwrap_or_default();
                    line.push(' ');
                    line.push_str(&format!("{variable:<variable_width$}"));
                }
            }
            if !c.rest.is_empty() {
                line.push(' ');
                line.push_str(&c.rest);
            }
            line.trim_end().to_string()
        })
        .collect()
}

/// Format tags without any padding: `@name body`.
pub(crate) fn format_plain(tags: &[&Tag]) -> Vec<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

fn max_width<'a>(cells: impl Iterator<Item = Option<&'a str>>) -> usize {
    cells
        .flatten()
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_align_type_and_variable() {
        let a = Tag::param("int", "example", "First.").unwrap();
        let b = Tag::param("string", "example2", "Second.").unwrap();
        assert_eq!(
            format_group(&[&a, &b]),
            vec![
                "@param int    $example  First.",
                "@param string $example2 Second.",
            ]
        );
    }

    #[test]
    fn property_variants_pad_keyword() {
        let a = Tag::property("int", "id", "").unwrap();
        let b = Tag::property_read("string", "name", "The name.").unwrap();
        assert_eq!(
            format_group(&[&a, &b]),
            vec![
                "@property      int    $id",
                "@property-read string $name The name.",
            ]
        );
    }

    #[test]
    fn generic_tag_is_not_padded_alone() {
        let tag = Tag::generic("since", "1.0").unwrap();
        assert_eq!(format_group(&[&tag]), vec!["@since 1.0"]);
    }

    #[test]
    fn untyped_param_keeps_single_space() {
        let tag = Tag::param("", "value", "Anything.").unwrap();
        assert_eq!(format_group(&[&tag]), vec!["@param $value Anything."]);
    }
}
