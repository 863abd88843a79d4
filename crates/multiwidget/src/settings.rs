//! Configurator settings.
//!
//! [`ListSettings`] holds the small amount of presentation configuration
//! the controller needs: the text-size choices offered by plaintext and
//! template rows, and the wording of the add-field dialog. Settings can be
//! parsed from TOML or JSON; missing keys fall back to the defaults.
//!
//! ```
//! use multiwidget::ListSettings;
//!
//! let settings = ListSettings::from_toml_str(r#"
//!     text_sizes = ["24", "16"]
//!     default_text_size = 1
//! "#).unwrap();
//! assert_eq!(settings.default_text_size(), "16");
//! assert_eq!(settings.field_dialog_title, "Field");
//! ```

use std::path::Path;

use multiwidget_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Presentation settings for the element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// Text sizes offered by plaintext and template rows.
    pub text_sizes: Vec<String>,
    /// Index into `text_sizes` selected on a fresh row.
    pub default_text_size: usize,
    /// Title of the add-field dialog.
    pub field_dialog_title: String,
    /// Prompt label of the add-field dialog.
    pub field_dialog_label: String,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            text_sizes: ["30", "20", "15", "12"].map(String::from).to_vec(),
            default_text_size: 0,
            field_dialog_title: "Field".to_string(),
            field_dialog_label: String::new(),
        }
    }
}

impl ListSettings {
    /// Parses and validates settings from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parses and validates settings from a JSON string.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(source).map_err(|err| Error::json("settings", err))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let source = match extension.as_deref() {
            Some("toml") | Some("json") => {
                std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?
            }
            _ => {
                return Err(Error::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        tracing::debug!(target: targets::SETTINGS, path = %path.display(), "loading settings");
        if extension.as_deref() == Some("toml") {
            Self::from_toml_str(&source)
        } else {
            Self::from_json_str(&source)
        }
    }

    /// Checks the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.text_sizes.is_empty() {
            return Err(Error::invalid_value("text_sizes", "must not be empty"));
        }
        if self.default_text_size >= self.text_sizes.len() {
            return Err(Error::invalid_value(
                "default_text_size",
                format!(
                    "index {} is out of range for {} text sizes",
                    self.default_text_size,
                    self.text_sizes.len()
                ),
            ));
        }
        Ok(())
    }

    /// Returns the text size selected on a fresh row.
    pub fn default_text_size(&self) -> &str {
        self.text_sizes
            .get(self.default_text_size)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ListSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_text_size(), "30");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = ListSettings::from_toml_str(r#"field_dialog_title = "Add field""#).unwrap();
        assert_eq!(settings.field_dialog_title, "Add field");
        assert_eq!(settings.text_sizes.len(), 4);
    }

    #[test]
    fn test_json_settings() {
        let settings =
            ListSettings::from_json_str(r#"{"text_sizes": ["14"], "default_text_size": 0}"#)
                .unwrap();
        assert_eq!(settings.default_text_size(), "14");
    }

    #[test]
    fn test_rejects_empty_sizes() {
        let err = ListSettings::from_toml_str("text_sizes = []").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref setting, .. } if setting == "text_sizes"));
    }

    #[test]
    fn test_rejects_default_out_of_range() {
        let err = ListSettings::from_toml_str("text_sizes = [\"12\"]\ndefault_text_size = 1")
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidValue { ref setting, .. } if setting == "default_text_size")
        );
    }

    #[test]
    fn test_malformed_toml() {
        let err = ListSettings::from_toml_str("text_sizes = [").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "text_sizes = [\"18\", \"11\"]").unwrap();
        drop(file);

        let settings = ListSettings::load(&path).unwrap();
        assert_eq!(settings.text_sizes, vec!["18".to_string(), "11".to_string()]);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let err = ListSettings::load("settings.yaml").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ListSettings::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
