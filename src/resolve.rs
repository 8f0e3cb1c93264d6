//! Breakpoint-aware style rule resolution.
//!
//! The resolver turns one property of a prop bag into an ordered list of
//! style rules:
//!
//! 1. the base value (`columns`), if any, as unconditioned declarations;
//! 2. one media rule per breakpoint that has an override (`columns-tablet`),
//!    ordered from the widest threshold to the narrowest.
//!
//! Narrower rules come later, so the cascade lets them win over wider ones.
//! Breakpoints without an override emit nothing.
//!
//! Overrides that name a breakpoint missing from the table are handled by an
//! [`UnknownBreakpointPolicy`].

use serde::{Deserialize, Serialize};

use crate::breakpoint::BreakpointTable;
use crate::error::{LayoutError, Result};
use crate::props::{LayoutProps, PropValue};
use crate::style::{Declaration, MediaRule, StyleRule};

/// What to do with `<prop>-<name>` when `<name>` is not a known breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownBreakpointPolicy {
    /// Drop the prop silently.
    Ignore,
    /// Drop the prop and log a warning.
    #[default]
    Warn,
    /// Fail with [`LayoutError::UnknownBreakpoint`].
    Error,
}

/// Resolves per-breakpoint props against a breakpoint table.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    breakpoints: &'a BreakpointTable,
    props: &'a LayoutProps,
    policy: UnknownBreakpointPolicy,
}

impl<'a> StyleResolver<'a> {
    pub fn new(breakpoints: &'a BreakpointTable, props: &'a LayoutProps) -> Self {
        Self {
            breakpoints,
            props,
            policy: UnknownBreakpointPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownBreakpointPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn breakpoints(&self) -> &'a BreakpointTable {
        self.breakpoints
    }

    /// Overrides of `bases` naming breakpoints missing from the table, as
    /// `(prop, breakpoint)` pairs in the order of `bases`.
    pub fn unknown_overrides<'p>(&'p self, bases: &[&'p str]) -> Vec<(String, &'p str)> {
        let mut unknown = Vec::new();
        for &base in bases {
            for (name, _) in self.props.overrides(base) {
                if !self.breakpoints.contains(name) {
                    unknown.push((format!("{}-{}", base, name), name));
                }
            }
        }
        unknown
    }

    /// Applies the unknown-breakpoint policy to the overrides of `bases`.
    ///
    /// Under [`UnknownBreakpointPolicy::Warn`] a single warning lists every
    /// dropped prop.
    pub fn check_overrides(&self, bases: &[&str]) -> Result<()> {
        let unknown = self.unknown_overrides(bases);
        if unknown.is_empty() {
            return Ok(());
        }
        match self.policy {
            UnknownBreakpointPolicy::Ignore => Ok(()),
            UnknownBreakpointPolicy::Warn => {
                let props: Vec<&str> = unknown.iter().map(|(prop, _)| prop.as_str()).collect();
                tracing::warn!(
                    props = %props.join(", "),
                    known = %self.breakpoints,
                    "ignoring props for unknown breakpoints"
                );
                Ok(())
            }
            UnknownBreakpointPolicy::Error => {
                let (prop, breakpoint) = &unknown[0];
                Err(LayoutError::UnknownBreakpoint {
                    prop: prop.clone(),
                    breakpoint: breakpoint.to_string(),
                })
            }
        }
    }

    /// Resolves the base value of `base` followed by its media rules.
    pub fn resolve<F>(&self, base: &str, mut format: F) -> Result<Vec<StyleRule>>
    where
        F: FnMut(&PropValue) -> Result<Vec<Declaration>>,
    {
        let mut rules: Vec<StyleRule> = match self.props.get(base) {
            Some(value) => format(value)?.into_iter().map(StyleRule::from).collect(),
            None => Vec::new(),
        };
        rules.extend(
            self.media_rules(base, &mut format)?
                .into_iter()
                .map(StyleRule::from),
        );
        Ok(rules)
    }

    /// Resolves only the media rules of `base`, widest breakpoint first.
    pub fn media_rules<F>(&self, base: &str, mut format: F) -> Result<Vec<MediaRule>>
    where
        F: FnMut(&PropValue) -> Result<Vec<Declaration>>,
    {
        self.combined_media_rules(&[base], |_, value| format(value))
    }

    /// Resolves several properties into one media rule per breakpoint.
    ///
    /// Within a rule, declarations follow the order of `bases`. A breakpoint
    /// where none of the properties is overridden emits no rule.
    pub fn combined_media_rules<F>(&self, bases: &[&str], mut format: F) -> Result<Vec<MediaRule>>
    where
        F: FnMut(&str, &PropValue) -> Result<Vec<Declaration>>,
    {
        self.check_overrides(bases)?;

        let mut rules = Vec::new();
        for bp in self.breakpoints.descending() {
            let mut declarations = Vec::new();
            for &base in bases {
                let key = format!("{}-{}", base, bp.name);
                if let Some(value) = self.props.get(&key) {
                    declarations.extend(format(base, value)?);
                }
            }
            if !declarations.is_empty() {
                rules.push(MediaRule::new(bp.name.clone(), bp.max_width, declarations));
            }
        }
        Ok(rules)
    }
}

/// Resolves one property of a prop bag with the default policy.
///
/// ```rust
/// use flexgrid::{resolve_property, BreakpointTable, Declaration, LayoutProps};
///
/// let table = BreakpointTable::new([("small", 500), ("big", 1000)]).unwrap();
/// let props = LayoutProps::new()
///     .with("columns", "repeat(3, 1fr)")
///     .with("columns-small", "1fr");
///
/// let rules = resolve_property("columns", &table, &props, |value| {
///     Ok(vec![Declaration::new("grid-template-columns", value.to_string())])
/// })
/// .unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
pub fn resolve_property<F>(
    base: &str,
    breakpoints: &BreakpointTable,
    props: &LayoutProps,
    format: F,
) -> Result<Vec<StyleRule>>
where
    F: FnMut(&PropValue) -> Result<Vec<Declaration>>,
{
    StyleResolver::new(breakpoints, props).resolve(base, format)
}
