//! Error types

/// Errors surfaced by tree construction, search and configuration.
///
/// Lookups of unknown nodes are not errors: they are logged and ignored.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The tree definition could not be parsed.
    #[error("Tree data parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A search or find pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as it was compiled.
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A field selector did not name a node field.
    #[error("Unknown node field: {0}")]
    UnknownField(String),

    /// A configuration file could not be read or decoded.
    #[error("Config error: {0}")]
    Config(String),
}

impl TreeError {
    pub(crate) fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
