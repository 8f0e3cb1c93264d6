//! Declarations and media rules.

use std::fmt;

use serde::Serialize;

/// A single `property: value` CSS declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

/// Declarations guarded by a `max-width` media query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MediaRule {
    /// Breakpoint the rule was produced for.
    pub breakpoint: String,
    /// Threshold in pixels; the rule applies at widths up to and including it.
    pub max_width: u32,
    pub declarations: Vec<Declaration>,
}

impl MediaRule {
    pub fn new(breakpoint: impl Into<String>, max_width: u32, declarations: Vec<Declaration>) -> Self {
        Self {
            breakpoint: breakpoint.into(),
            max_width,
            declarations,
        }
    }

    /// The media query text, e.g. `(max-width: 768px)`.
    pub fn condition(&self) -> String {
        format!("(max-width: {}px)", self.max_width)
    }

    /// Whether the rule is active at the given viewport width.
    pub fn applies_at(&self, width: u32) -> bool {
        width <= self.max_width
    }
}

/// One entry of a resolved style block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleRule {
    Declaration(Declaration),
    Media(MediaRule),
}

impl From<Declaration> for StyleRule {
    fn from(decl: Declaration) -> Self {
        StyleRule::Declaration(decl)
    }
}

impl From<MediaRule> for StyleRule {
    fn from(rule: MediaRule) -> Self {
        StyleRule::Media(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_display() {
        assert_eq!(Declaration::new("display", "flex").to_string(), "display: flex;");
    }

    #[test]
    fn test_media_rule_applies_inclusive() {
        let rule = MediaRule::new("phone", 576, vec![]);
        assert!(rule.applies_at(500));
        assert!(rule.applies_at(576));
        assert!(!rule.applies_at(577));
        assert_eq!(rule.condition(), "(max-width: 576px)");
    }
}
