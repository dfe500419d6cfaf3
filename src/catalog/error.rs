use std::path::PathBuf;

use thiserror::Error;

use crate::codegen::{
    PlaceholderError,
    TemplateError,
};
use crate::indexer::MatcherError;
use crate::input::translation::TranslationError;

/// Errors that abort a catalog compilation run.
///
/// Every variant names the language and, where one exists, the section key or file
/// path involved.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid path segment '{segment}' at {path} in language {shortcode}")]
    InvalidSegment { shortcode: String, path: PathBuf, segment: String },

    #[error("No translations found in the file {path} (language {shortcode})")]
    MissingPayload { shortcode: String, path: PathBuf },

    #[error("Found a top-level string value in {path} (language {shortcode})")]
    RootLiteral { shortcode: String, path: PathBuf },

    #[error("Invalid translation file {path} (language {shortcode}): {source}")]
    InvalidTranslationFile {
        shortcode: String,
        path: PathBuf,
        #[source]
        source: TranslationError,
    },

    #[error(
        "The translation \"{text}\" at '{key_path}' in section '{key}' (language {shortcode}) requires a value for {placeholder} but it was not declared"
    )]
    UndeclaredPlaceholder {
        shortcode: String,
        key: String,
        key_path: String,
        placeholder: String,
        text: String,
    },

    #[error("Invalid template in section '{key}' (language {shortcode}): {source}")]
    InvalidTemplate {
        shortcode: String,
        key: String,
        #[source]
        source: TemplateError,
    },

    #[error("Section '{key}' is defined by both {first} and {second} (language {shortcode})")]
    DuplicateSection { shortcode: String, key: String, first: PathBuf, second: PathBuf },

    #[error("Sections at {first} and {second} both generate the identifier '{name}' (language {shortcode})")]
    DuplicateIdentifier { shortcode: String, name: String, first: PathBuf, second: PathBuf },

    #[error("Language {shortcode} is configured more than once")]
    DuplicateShortcode { shortcode: String },

    #[error("Language {shortcode} needs a name")]
    MissingName { shortcode: String },

    #[error(
        "Language {shortcode} needs a distinct name, but {name} has already been used by {first}"
    )]
    DuplicateName { shortcode: String, name: String, first: String },

    #[error(
        "Language {shortcode} needs to extend another language. Only {base} does not extend another language"
    )]
    MissingParent { shortcode: String, base: String },

    #[error("Language {shortcode} is the base language and cannot extend {parent}")]
    IllegalParent { shortcode: String, parent: String },

    #[error("Language {shortcode} extends {parent}, which is not configured")]
    UnknownParent { shortcode: String, parent: String },

    #[error("Base language {shortcode} is not configured")]
    MissingBaseLanguage { shortcode: String },

    #[error("Languages {} never reach the base language through 'extends'", .shortcodes.join(", "))]
    InheritanceCycle { shortcodes: Vec<String> },

    #[error("Base language {shortcode} has no translation directory at {path}")]
    MissingBaseTranslations { shortcode: String, path: PathBuf },

    #[error("Section '{key}' of language {shortcode} does not exist in the base language")]
    UnknownSection { shortcode: String, key: String },

    #[error("Section '{key}' of language {shortcode} does not match the base language's shape")]
    ShapeMismatch { shortcode: String, key: String },

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Lifts a payload error, keeping the dedicated kinds distinct.
    pub(crate) fn from_translation(
        shortcode: &str,
        path: impl Into<PathBuf>,
        source: TranslationError,
    ) -> Self {
        let shortcode = shortcode.to_string();
        let path = path.into();
        match source {
            TranslationError::MissingPayload => Self::MissingPayload { shortcode, path },
            TranslationError::RootLiteral => Self::RootLiteral { shortcode, path },
            source => Self::InvalidTranslationFile { shortcode, path, source },
        }
    }

    /// Lifts a template error found while compiling section `key`.
    pub(crate) fn from_template(shortcode: &str, key: &str, error: TemplateError) -> Self {
        match error.source {
            PlaceholderError::UndeclaredPlaceholder { text, placeholder } => {
                Self::UndeclaredPlaceholder {
                    shortcode: shortcode.to_string(),
                    key: key.to_string(),
                    key_path: error.key_path,
                    placeholder,
                    text,
                }
            }
            _ => Self::InvalidTemplate {
                shortcode: shortcode.to_string(),
                key: key.to_string(),
                source: error,
            },
        }
    }
}
