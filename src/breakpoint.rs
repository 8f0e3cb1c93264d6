//! Named viewport breakpoints.
//!
//! A [`BreakpointTable`] maps breakpoint names to `max-width` thresholds in
//! pixels. Entries are stored in insertion order, but style resolution always
//! walks them from the widest threshold to the narrowest via
//! [`BreakpointTable::descending`]: a narrower rule placed later in the
//! stylesheet overrides a wider one through normal cascade order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{LayoutError, Result};
use crate::props::PropValue;

/// A single named breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Breakpoint {
    /// Name used in per-breakpoint props (`col-<name>`).
    pub name: String,
    /// Maximum viewport width in pixels at which the breakpoint applies.
    pub max_width: u32,
}

/// Ordered mapping from breakpoint name to width threshold.
///
/// # Example
///
/// ```rust
/// use flexgrid::BreakpointTable;
///
/// let table = BreakpointTable::new([("small", 500), ("big", 1000)]).unwrap();
/// let names: Vec<_> = table.descending().map(|bp| bp.name.as_str()).collect();
/// assert_eq!(names, ["big", "small"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    entries: Vec<Breakpoint>,
}

impl BreakpointTable {
    /// Builds a table from `(name, max_width)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidBreakpointTable`] when the table is
    /// empty, a name is blank or contains whitespace, a name repeats, or a
    /// threshold is zero.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut table = Self {
            entries: Vec::new(),
        };
        for (name, max_width) in entries {
            table.push(name.into(), max_width)?;
        }
        if table.entries.is_empty() {
            return Err(LayoutError::breakpoints("table has no breakpoints"));
        }
        Ok(table)
    }

    /// The default table: phone 576, tablet 768, laptop 992, desktop 1200.
    pub fn standard() -> Self {
        let entries = [("phone", 576), ("tablet", 768), ("laptop", 992), ("desktop", 1200)]
            .into_iter()
            .map(|(name, max_width)| Breakpoint {
                name: name.to_string(),
                max_width,
            })
            .collect();
        Self { entries }
    }

    fn push(&mut self, name: String, max_width: u32) -> Result<()> {
        if name.is_empty() {
            return Err(LayoutError::breakpoints("breakpoint name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(LayoutError::breakpoints(format!(
                "breakpoint name '{}' contains whitespace",
                name
            )));
        }
        if max_width == 0 {
            return Err(LayoutError::breakpoints(format!(
                "breakpoint '{}' has a zero width threshold",
                name
            )));
        }
        if self.contains(&name) {
            return Err(LayoutError::breakpoints(format!(
                "breakpoint '{}' is defined twice",
                name
            )));
        }
        self.entries.push(Breakpoint { name, max_width });
        Ok(())
    }

    /// Reads a table out of a `breakPoints` prop value, in document order.
    pub fn from_prop(prop: &str, value: &PropValue) -> Result<Self> {
        let PropValue::Map(map) = value else {
            return Err(LayoutError::invalid_prop(
                prop,
                "mapping of breakpoint names to pixel widths",
                value.describe(),
            ));
        };
        let mut entries = Vec::with_capacity(map.len());
        for (name, width) in map {
            let width = width.as_u32().ok_or_else(|| {
                LayoutError::invalid_prop(
                    format!("{}.{}", prop, name),
                    "positive integer",
                    width.describe(),
                )
            })?;
            entries.push((name.clone(), width));
        }
        Self::new(entries)
    }

    /// Returns the threshold for a breakpoint name.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|bp| bp.name == name)
            .map(|bp| bp.max_width)
    }

    /// Checks whether a breakpoint with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|bp| bp.name == name)
    }

    /// Number of breakpoints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed table; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates breakpoints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.entries.iter()
    }

    /// Iterates breakpoints from the widest threshold to the narrowest.
    ///
    /// Breakpoints sharing a threshold keep their insertion order.
    pub fn descending(&self) -> impl Iterator<Item = &Breakpoint> {
        let mut sorted: Vec<&Breakpoint> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.max_width.cmp(&a.max_width));
        sorted.into_iter()
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for BreakpointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|bp| format!("{}={}px", bp.name, bp.max_width))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl Serialize for BreakpointTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for bp in &self.entries {
            map.serialize_entry(&bp.name, &bp.max_width)?;
        }
        map.end()
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = BreakpointTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of breakpoint names to pixel widths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, u32)> = Vec::new();
        while let Some((name, width)) = access.next_entry::<String, u32>()? {
            entries.push((name, width));
        }
        BreakpointTable::new(entries).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for BreakpointTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor)
    }
}
