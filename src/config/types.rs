use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::codegen::RuntimeImports;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0].shortcode")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    /// Directory holding one translation tree per language shortcode.
    pub translations_dir: String,
    /// Directory the generated modules are written to. Cleared on every run.
    pub output_dir: String,

    /// Shortcode of the only language without a parent.
    pub base_language: String,

    /// Glob matched against file names; other files in the trees are ignored.
    pub translation_file_pattern: String,

    pub runtime: RuntimeConfig,

    /// Configured languages. Generation order is derived from `extends`, ties keep
    /// this order.
    pub languages: Vec<LanguageConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    pub shortcode: String,
    /// Display name. Required, checked when the language set is built.
    #[serde(default)]
    pub name: Option<String>,
    /// Shortcode of the parent language.
    #[serde(default)]
    pub extends: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeConfig {
    pub interpolate_module: String,
    pub metadata_module: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let imports = RuntimeImports::default();
        Self {
            interpolate_module: imports.interpolate_module,
            metadata_module: imports.metadata_module,
        }
    }
}

impl From<&RuntimeConfig> for RuntimeImports {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            interpolate_module: config.interpolate_module.clone(),
            metadata_module: config.metadata_module.clone(),
        }
    }
}

impl LanguageConfig {
    #[must_use]
    pub fn new(shortcode: impl Into<String>, name: Option<&str>, extends: Option<&str>) -> Self {
        Self {
            shortcode: shortcode.into(),
            name: name.map(ToString::to_string),
            extends: extends.map(ToString::to_string),
        }
    }
}

/// Shortcodes become file names and, without dashes, identifiers.
fn is_valid_shortcode(shortcode: &str) -> bool {
    shortcode.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && shortcode.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !shortcode.ends_with('-')
}

impl CatalogSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Malformed shortcode
    ///
    /// Language integrity (names, parents) is checked when the language set is built.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translations_dir.is_empty() {
            errors.push(ValidationError::new(
                "translationsDir",
                "The directory cannot be empty. Example: \"src/translations\"",
            ));
        }

        if self.output_dir.is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The directory cannot be empty. Example: \"src/values\"",
            ));
        }

        if self.base_language.is_empty() {
            errors.push(ValidationError::new(
                "baseLanguage",
                "The base language cannot be empty. Example: \"en-gb\"",
            ));
        }

        if self.translation_file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFilePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_file_pattern) {
            errors.push(ValidationError::new(
                "translationFilePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_file_pattern),
            ));
        }

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [{\"shortcode\": \"en-gb\", \"name\": \"English (GB)\"}]",
            ));
        }

        for (index, language) in self.languages.iter().enumerate() {
            if !is_valid_shortcode(&language.shortcode) {
                errors.push(ValidationError::new(
                    format!("languages[{index}].shortcode"),
                    format!(
                        "Invalid shortcode '{}'. Use letters, digits and dashes, e.g. \"en-gb\"",
                        language.shortcode
                    ),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            translations_dir: "src/translations".to_string(),
            output_dir: "src/values".to_string(),
            base_language: "en-gb".to_string(),
            translation_file_pattern: "*.json".to_string(),
            runtime: RuntimeConfig::default(),
            languages: vec![LanguageConfig::new("en-gb", Some("English (GB)"), None)],
        }
    }
}
