//! Error types for catalog and settings loading.
//!
//! Editing operations on the element list never fail; only the edges that
//! parse external data return these errors.

use std::path::PathBuf;

/// Result type alias for fallible configurator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading catalogs or settings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON parsing error.
    #[error("Failed to parse {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// TOML parsing error.
    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported settings format for '{path}' (expected .toml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Invalid settings value.
    #[error("Invalid value for setting '{setting}': {message}")]
    InvalidValue { setting: String, message: String },
}

impl Error {
    /// Create a JSON error for the named document kind.
    pub fn json(what: &'static str, source: serde_json::Error) -> Self {
        Self::Json { what, source }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = Error::invalid_value("text_sizes", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid value for setting 'text_sizes': must not be empty"
        );
    }

    #[test]
    fn test_json_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::json("service catalog", source);
        assert!(err.to_string().starts_with("Failed to parse service catalog JSON"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
