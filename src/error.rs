//! Layout errors.

/// Result type alias for layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised while building or rendering layouts.
///
/// Every variant is produced at construction time, before any CSS is
/// emitted, so a successfully built container never yields invalid output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The breakpoint table is empty or contains an invalid entry.
    #[error("invalid breakpoint table: {reason}")]
    InvalidBreakpointTable { reason: String },

    /// A grid track list could not be parsed.
    #[error("invalid track list '{track}': {reason}")]
    InvalidTrackList { track: String, reason: String },

    /// A grid area matrix is not well formed.
    #[error("invalid area matrix: {reason}")]
    InvalidAreaMatrix { reason: String },

    /// A prop holds a value of the wrong shape.
    #[error("invalid value for prop '{prop}': expected {expected}, found {found}")]
    InvalidProp {
        prop: String,
        expected: String,
        found: String,
    },

    /// A per-breakpoint prop names a breakpoint missing from the table.
    #[error("prop '{prop}' refers to unknown breakpoint '{breakpoint}'")]
    UnknownBreakpoint { prop: String, breakpoint: String },

    /// A configuration or layout file could not be decoded.
    #[error("config error: {message}")]
    Config { message: String },

    /// The document template failed to render.
    #[error("render error: {message}")]
    Render { message: String },
}

impl LayoutError {
    /// Creates a breakpoint table error.
    pub fn breakpoints(reason: impl Into<String>) -> Self {
        Self::InvalidBreakpointTable {
            reason: reason.into(),
        }
    }

    /// Creates a track list error.
    pub fn track_list(track: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTrackList {
            track: track.into(),
            reason: reason.into(),
        }
    }

    /// Creates an area matrix error.
    pub fn area_matrix(reason: impl Into<String>) -> Self {
        Self::InvalidAreaMatrix {
            reason: reason.into(),
        }
    }

    /// Creates a prop type error.
    pub fn invalid_prop(
        prop: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidProp {
            prop: prop.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl From<serde_yaml::Error> for LayoutError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for LayoutError {
    fn from(err: minijinja::Error) -> Self {
        Self::Render {
            message: err.to_string(),
        }
    }
}
