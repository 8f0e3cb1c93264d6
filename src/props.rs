//! Prop bags handed to layout containers.
//!
//! A [`LayoutProps`] bag is a flat mapping from property name to
//! [`PropValue`]. Besides base properties such as `columns`, a bag may hold
//! per-breakpoint overrides named `<property>-<breakpoint>` (for example
//! `columns-tablet`). Bags deserialize from any serde format, so they can be
//! written inline in code, loaded from JSON, or embedded in a YAML layout.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// A single prop value.
///
/// `Null` is accepted wherever a value is and is treated as absent. Mapping
/// entries keep their document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<PropValue>),
    Map(#[serde(with = "ordered_entries")] Vec<(String, PropValue)>),
}

impl PropValue {
    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as an integer if it is a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(*n as i64),
            _ => None,
        }
    }

    /// Returns the value as a non-negative integer that fits in `u32`.
    pub fn as_u32(&self) -> Option<u32> {
        self.as_i64().and_then(|n| u32::try_from(n).ok())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short human readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            PropValue::Null => "null".to_string(),
            PropValue::Bool(b) => format!("boolean {}", b),
            PropValue::Number(n) => format!("number {}", n),
            PropValue::Text(s) => format!("string \"{}\"", s),
            PropValue::List(items) => format!("list of {} items", items.len()),
            PropValue::Map(map) => format!("mapping of {} entries", map.len()),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Null => Ok(()),
            PropValue::Bool(b) => write!(f, "{}", b),
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(s) => f.write_str(s),
            PropValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            PropValue::Map(_) => f.write_str(&self.describe()),
        }
    }
}

mod ordered_entries {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::PropValue;

    pub fn serialize<S: Serializer>(
        entries: &[(String, PropValue)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, PropValue)>, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, PropValue)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a mapping with string keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::new();
            while let Some(entry) = access.next_entry::<String, PropValue>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<u32> for PropValue {
    fn from(n: u32) -> Self {
        PropValue::Number(n as f64)
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Text(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Text(s)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(items: Vec<T>) -> Self {
        PropValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropValue>, const N: usize> From<[T; N]> for PropValue {
    fn from(items: [T; N]) -> Self {
        PropValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// A flat bag of layout props.
///
/// # Example
///
/// ```rust
/// use flexgrid::LayoutProps;
///
/// let props = LayoutProps::new()
///     .with("columns", "repeat(3, 1fr)")
///     .with("columns-phone", ["1fr"])
///     .with("gap", 10);
///
/// assert_eq!(props.u32_prop("gap").unwrap(), Some(10));
/// assert!(props.contains("columns-phone"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutProps {
    values: BTreeMap<String, PropValue>,
}

impl LayoutProps {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a bag from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a prop, returning the updated bag for chaining.
    pub fn with<V: Into<PropValue>>(mut self, name: &str, value: V) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces a prop.
    pub fn insert<V: Into<PropValue>>(&mut self, name: &str, value: V) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Looks up a prop. `Null` values are reported as absent.
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Checks whether a non-null prop is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates all non-null props ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the per-breakpoint overrides of `base`.
    ///
    /// Yields `(breakpoint_name, value)` for every non-null key of the form
    /// `<base>-<breakpoint_name>`, whether or not the breakpoint exists.
    pub fn overrides<'a>(&'a self, base: &'a str) -> impl Iterator<Item = (&'a str, &'a PropValue)> + 'a {
        self.iter().filter_map(move |(key, value)| {
            key.strip_prefix(base)
                .and_then(|rest| rest.strip_prefix('-'))
                .filter(|name| !name.is_empty())
                .map(|name| (name, value))
        })
    }

    /// Reads a boolean prop.
    pub fn bool_prop(&self, name: &str) -> Result<Option<bool>> {
        self.typed(name, "boolean", PropValue::as_bool)
    }

    /// Reads a non-negative integer prop.
    pub fn u32_prop(&self, name: &str) -> Result<Option<u32>> {
        self.typed(name, "non-negative integer", PropValue::as_u32)
    }

    /// Reads an integer prop.
    pub fn i64_prop(&self, name: &str) -> Result<Option<i64>> {
        self.typed(name, "integer", PropValue::as_i64)
    }

    /// Reads a string prop.
    pub fn str_prop(&self, name: &str) -> Result<Option<&str>> {
        self.typed(name, "string", PropValue::as_str)
    }

    /// Parses a keyword prop into a typed enum.
    pub fn keyword<K: CssKeyword>(&self, name: &str) -> Result<Option<K>> {
        self.get(name).map(|value| K::from_prop(name, value)).transpose()
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        extract: impl Fn(&'a PropValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| LayoutError::invalid_prop(name, expected, value.describe())),
        }
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for LayoutProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A closed set of CSS keywords accepted by a prop.
pub trait CssKeyword: Sized + Copy {
    /// Every accepted keyword in declaration order.
    const KEYWORDS: &'static [&'static str];

    /// Parses a keyword.
    fn parse_keyword(s: &str) -> Option<Self>;

    /// The CSS spelling of the keyword.
    fn as_css(&self) -> &'static str;

    /// Parses a prop value, reporting the accepted keywords on failure.
    fn from_prop(prop: &str, value: &PropValue) -> Result<Self> {
        value
            .as_str()
            .and_then(Self::parse_keyword)
            .ok_or_else(|| {
                LayoutError::invalid_prop(
                    prop,
                    format!("one of {}", Self::KEYWORDS.join(", ")),
                    value.describe(),
                )
            })
    }
}

/// Declares an enum of CSS keywords implementing [`CssKeyword`] and `Display`.
macro_rules! css_keyword {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $css:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $css)] $variant ),+
        }

        impl $crate::props::CssKeyword for $name {
            const KEYWORDS: &'static [&'static str] = &[$($css),+];

            fn parse_keyword(s: &str) -> Option<Self> {
                match s {
                    $( $css => Some($name::$variant), )+
                    _ => None,
                }
            }

            fn as_css(&self) -> &'static str {
                match self {
                    $( $name::$variant => $css, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::props::CssKeyword::as_css(self))
            }
        }
    };
}

pub(crate) use css_keyword;
