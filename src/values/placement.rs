//! Grid line placement for `grid-column` and `grid-row`.

use std::fmt;

use crate::error::{LayoutError, Result};
use crate::props::PropValue;

/// One side of a placement: a line number or a keyword expression such as
/// `span 2`, `auto` or a named line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridLine {
    Index(i64),
    Keyword(String),
}

impl fmt::Display for GridLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridLine::Index(n) => write!(f, "{}", n),
            GridLine::Keyword(s) => f.write_str(s),
        }
    }
}

/// A `start / end` pair of grid lines, or a single expression.
///
/// Props accept a one- or two-element list (`[1, "span 2"]`), a bare
/// integer, or a string used verbatim (`"1 / 3"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub start: GridLine,
    pub end: Option<GridLine>,
}

impl Placement {
    pub fn new(start: GridLine, end: Option<GridLine>) -> Self {
        Self { start, end }
    }

    pub fn from_prop(prop: &str, value: &PropValue) -> Result<Self> {
        match value {
            PropValue::List(items) if (1..=2).contains(&items.len()) => {
                let start = line_from_prop(prop, &items[0])?;
                let end = items.get(1).map(|item| line_from_prop(prop, item)).transpose()?;
                Ok(Self { start, end })
            }
            PropValue::Text(_) | PropValue::Number(_) => Ok(Self {
                start: line_from_prop(prop, value)?,
                end: None,
            }),
            other => Err(LayoutError::invalid_prop(
                prop,
                "grid line, or list of one or two grid lines",
                other.describe(),
            )),
        }
    }

    pub fn as_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.end {
            Some(end) => write!(f, "{} / {}", self.start, end),
            None => write!(f, "{}", self.start),
        }
    }
}

fn line_from_prop(prop: &str, value: &PropValue) -> Result<GridLine> {
    if let Some(n) = value.as_i64() {
        return Ok(GridLine::Index(n));
    }
    match value.as_str().map(str::trim) {
        Some(s) if is_safe_value(s) => Ok(GridLine::Keyword(s.to_string())),
        _ => Err(LayoutError::invalid_prop(
            prop,
            "integer line or grid line expression",
            value.describe(),
        )),
    }
}

/// Rejects empty strings and text that would escape a declaration:
/// terminators, quotes, escapes, comment markers and unbalanced `(`/`[`.
pub(crate) fn is_safe_value(s: &str) -> bool {
    !s.is_empty()
        && !s.contains([';', '{', '}', '"', '\'', '<', '>', '\\', '\n'])
        && !s.contains("/*")
        && !s.contains("*/")
        && is_balanced(s)
}

/// Checks that every `(` and `[` is closed, in order.
fn is_balanced(s: &str) -> bool {
    let mut open: Vec<char> = Vec::new();
    for c in s.chars() {
        match c {
            '(' => open.push(')'),
            '[' => open.push(']'),
            ')' | ']' => {
                if open.pop() != Some(c) {
                    return false;
                }
            }
            _ => {}
        }
    }
    open.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_with_span() {
        let value = PropValue::List(vec![PropValue::from(1), PropValue::from("span 2")]);
        let placement = Placement::from_prop("column", &value).unwrap();
        assert_eq!(placement.as_css(), "1 / span 2");
    }

    #[test]
    fn test_single_element_list() {
        let value = PropValue::from(vec!["span 3"]);
        assert_eq!(Placement::from_prop("row", &value).unwrap().as_css(), "span 3");
    }

    #[test]
    fn test_verbatim_string_and_integer() {
        assert_eq!(
            Placement::from_prop("row", &PropValue::from("1 / 3")).unwrap().as_css(),
            "1 / 3"
        );
        assert_eq!(Placement::from_prop("row", &PropValue::from(-1)).unwrap().as_css(), "-1");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(Placement::from_prop("row", &PropValue::from(vec![1, 2, 3])).is_err());
        assert!(Placement::from_prop("row", &PropValue::Bool(true)).is_err());
        assert!(Placement::from_prop("row", &PropValue::from(1.5)).is_err());
        assert!(Placement::from_prop("row", &PropValue::from("1; color: red")).is_err());
    }

    #[test]
    fn test_safe_value_rejects_comments_and_escapes() {
        assert!(!is_safe_value("1 /*"));
        assert!(!is_safe_value("1 */"));
        assert!(!is_safe_value("1\\"));
        assert!(!is_safe_value("a ("));
        assert!(!is_safe_value("span 2)"));
        assert!(!is_safe_value("[a"));
        assert!(!is_safe_value("(a]"));
        assert!(is_safe_value("0 0 calc(100% - 2em)"));
        assert!(is_safe_value("[main-start] / span 2"));
    }
}
