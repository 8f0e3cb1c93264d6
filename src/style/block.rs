//! Resolved style blocks and their CSS serialization.

use std::fmt::{self, Write as _};

use serde::Serialize;

use super::rule::{Declaration, MediaRule, StyleRule};

/// The ordered output of a style builder.
///
/// A block is a list of unconditioned declarations and media rules kept in
/// emission order. It is only turned into text at the boundary: `Display`
/// writes the nested form (media rules inline, as in a CSS-in-markup
/// template), while [`ResolvedStyleBlock::to_stylesheet`] scopes the block
/// to a selector and hoists media rules out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyleBlock {
    rules: Vec<StyleRule>,
}

impl ResolvedStyleBlock {
    pub fn new(rules: Vec<StyleRule>) -> Self {
        Self { rules }
    }

    /// All rules in emission order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Unconditioned declarations in emission order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.rules.iter().filter_map(|rule| match rule {
            StyleRule::Declaration(decl) => Some(decl),
            StyleRule::Media(_) => None,
        })
    }

    /// Media rules in emission order.
    pub fn media_rules(&self) -> impl Iterator<Item = &MediaRule> {
        self.rules.iter().filter_map(|rule| match rule {
            StyleRule::Media(media) => Some(media),
            StyleRule::Declaration(_) => None,
        })
    }

    /// Returns the unconditioned value of a property, last one winning.
    pub fn base_value(&self, property: &str) -> Option<&str> {
        self.declarations()
            .filter(|decl| decl.property == property)
            .last()
            .map(|decl| decl.value.as_str())
    }

    /// Evaluates the cascade for a viewport width.
    ///
    /// Base declarations apply first, then every media rule active at
    /// `width`, in emission order. A later declaration of a property
    /// replaces the earlier value but keeps the property's first position.
    pub fn computed_at(&self, width: u32) -> Vec<Declaration> {
        let mut computed: Vec<Declaration> = Vec::new();
        let active = self
            .declarations()
            .chain(
                self.media_rules()
                    .filter(|media| media.applies_at(width))
                    .flat_map(|media| media.declarations.iter()),
            );
        for decl in active {
            match computed.iter_mut().find(|c| c.property == decl.property) {
                Some(existing) => existing.value = decl.value.clone(),
                None => computed.push(decl.clone()),
            }
        }
        computed
    }

    /// The winning value of `property` at a viewport width.
    pub fn value_at(&self, property: &str, width: u32) -> Option<String> {
        self.computed_at(width)
            .into_iter()
            .find(|decl| decl.property == property)
            .map(|decl| decl.value)
    }

    /// Serializes the block as stylesheet rules for `selector`.
    ///
    /// ```rust
    /// use flexgrid::{Declaration, MediaRule, ResolvedStyleBlock, StyleRule};
    ///
    /// let block = ResolvedStyleBlock::new(vec![
    ///     StyleRule::Declaration(Declaration::new("width", "50%")),
    ///     StyleRule::Media(MediaRule::new("phone", 576, vec![Declaration::new("width", "100%")])),
    /// ]);
    /// assert_eq!(
    ///     block.to_stylesheet(".item"),
    ///     ".item {\n  width: 50%;\n}\n@media (max-width: 576px) {\n  .item {\n    width: 100%;\n  }\n}\n"
    /// );
    /// ```
    pub fn to_stylesheet(&self, selector: &str) -> String {
        let mut out = String::new();
        let base: Vec<&Declaration> = self.declarations().collect();
        if !base.is_empty() {
            let _ = writeln!(out, "{} {{", selector);
            for decl in base {
                let _ = writeln!(out, "  {}", decl);
            }
            out.push_str("}\n");
        }
        for media in self.media_rules() {
            if media.declarations.is_empty() {
                continue;
            }
            let _ = writeln!(out, "@media {} {{", media.condition());
            let _ = writeln!(out, "  {} {{", selector);
            for decl in &media.declarations {
                let _ = writeln!(out, "    {}", decl);
            }
            out.push_str("  }\n}\n");
        }
        out
    }
}

impl fmt::Display for ResolvedStyleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            match rule {
                StyleRule::Declaration(decl) => writeln!(f, "{}", decl)?,
                StyleRule::Media(media) => {
                    writeln!(f, "@media {} {{", media.condition())?;
                    for decl in &media.declarations {
                        writeln!(f, "  {}", decl)?;
                    }
                    writeln!(f, "}}")?;
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<StyleRule> for ResolvedStyleBlock {
    fn from_iter<I: IntoIterator<Item = StyleRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
