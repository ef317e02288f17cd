use thiserror::Error;

/// Result type for tabula operations
pub type Result<T> = std::result::Result<T, TabulaError>;

/// Main error type for the tabula library
#[derive(Debug, Error)]
pub enum TabulaError {
    /// IO errors (config, maze and output files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration line that is not a `KEY=VALUE` pair
    #[error("Invalid config line {line}: {content:?}")]
    ConfigParse { line: usize, content: String },

    /// A required configuration key is absent
    #[error("Missing config key '{0}'")]
    MissingKey(String),

    /// A configuration value that does not parse to the expected type
    #[error("Invalid value {value:?} for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Agent name not known to the factory
    #[error("Unknown agent '{0}'")]
    UnknownAgent(String),

    /// Environment name not known to the factory
    #[error("Unknown environment '{0}'")]
    UnknownEnvironment(String),

    /// Malformed maze grid
    #[error("Invalid maze: {0}")]
    InvalidMaze(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for TabulaError {
    fn from(err: bincode::Error) -> Self {
        TabulaError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for TabulaError {
    fn from(err: serde_json::Error) -> Self {
        TabulaError::Serialization(err.to_string())
    }
}

// Helper functions for common error patterns
impl TabulaError {
    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        TabulaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_value<K: Into<String>, V: Into<String>, R: Into<String>>(
        key: K,
        value: V,
        reason: R,
    ) -> Self {
        TabulaError::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_maze<S: Into<String>>(reason: S) -> Self {
        TabulaError::InvalidMaze(reason.into())
    }
}
