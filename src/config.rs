//! Layout configuration.
//!
//! A config file fixes the breakpoint table, the handling of overrides for
//! unknown breakpoints and the prefix of generated class names:
//!
//! ```yaml
//! breakpoints:
//!   phone: 576
//!   tablet: 768
//! unknown_breakpoints: error
//! class_prefix: layout
//! ```
//!
//! Every field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breakpoint::BreakpointTable;
use crate::context::LayoutContext;
use crate::error::{LayoutError, Result};
use crate::resolve::UnknownBreakpointPolicy;

/// Document-wide layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub breakpoints: BreakpointTable,
    pub unknown_breakpoints: UnknownBreakpointPolicy,
    pub class_prefix: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoints: BreakpointTable::standard(),
            unknown_breakpoints: UnknownBreakpointPolicy::default(),
            class_prefix: "fg".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Loads a config file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| LayoutError::Config {
            message: format!("failed to read {}: {}", path.display(), err),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&source),
            _ => Self::from_yaml(&source),
        }
    }

    /// The context handed to the root of a layout tree.
    pub fn root_context(&self) -> LayoutContext {
        LayoutContext::root(self.breakpoints.clone()).with_policy(self.unknown_breakpoints)
    }

    fn validate(self) -> Result<Self> {
        if !is_class_prefix(&self.class_prefix) {
            return Err(LayoutError::Config {
                message: format!(
                    "class_prefix '{}' must start with a letter and contain only letters, digits, '-' or '_'",
                    self.class_prefix
                ),
            });
        }
        Ok(self)
    }
}

fn is_class_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::from_yaml("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.class_prefix, "fg");
        assert_eq!(config.breakpoints.get("desktop"), Some(1200));
    }

    #[test]
    fn test_full_yaml() {
        let config = LayoutConfig::from_yaml(
            "breakpoints:\n  small: 500\n  big: 1000\nunknown_breakpoints: error\nclass_prefix: page\n",
        )
        .unwrap();
        assert_eq!(config.breakpoints.len(), 2);
        assert_eq!(config.unknown_breakpoints, UnknownBreakpointPolicy::Error);

        let ctx = config.root_context();
        assert_eq!(ctx.unknown_breakpoints, UnknownBreakpointPolicy::Error);
        assert_eq!(ctx.breakpoints.get("big"), Some(1000));
        assert_eq!(ctx.display, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(LayoutConfig::from_yaml("class_prefix: 1col\n").is_err());
        assert!(LayoutConfig::from_yaml("class_prefix: 'a b'\n").is_err());
        assert!(LayoutConfig::from_yaml("breakpoints: {}\n").is_err());
        assert!(LayoutConfig::from_yaml("unknown_breakpoints: maybe\n").is_err());
        assert!(LayoutConfig::from_yaml("prefix: fg\n").is_err());
    }

    #[test]
    fn test_load_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("layout.json");
        std::fs::write(&json, r#"{"class_prefix": "j"}"#).unwrap();
        assert_eq!(LayoutConfig::load(&json).unwrap().class_prefix, "j");

        let yaml = dir.path().join("layout.yml");
        std::fs::write(&yaml, "unknown_breakpoints: ignore\n").unwrap();
        assert_eq!(
            LayoutConfig::load(&yaml).unwrap().unknown_breakpoints,
            UnknownBreakpointPolicy::Ignore
        );

        let err = LayoutConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, LayoutError::Config { .. }));
    }
}
