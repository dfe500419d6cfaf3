//! Target independent syntax of one compiled section.

use thiserror::Error;

use super::placeholder::{
    PlaceholderError,
    validate_template,
};
use crate::ir::translation::{
    Translation,
    Translations,
};

/// A placeholder problem together with the entry it was found in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid template at '{key_path}': {source}")]
pub struct TemplateError {
    /// Dotted path of the entry inside the section.
    pub key_path: String,
    #[source]
    pub source: PlaceholderError,
}

/// One named entry of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxEntry {
    Literal { name: String, text: String },
    /// Callable taking `params` as plain text and interpolating them into `text`.
    Callable { name: String, text: String, params: Vec<String> },
    /// Named sub-object.
    Block { name: String, entries: Vec<SyntaxEntry> },
}

impl SyntaxEntry {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Literal { name, .. } | Self::Callable { name, .. } | Self::Block { name, .. } => {
                name
            }
        }
    }
}

/// Entries of one section; the root itself is never wrapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    pub entries: Vec<SyntaxEntry>,
}

impl SyntaxTree {
    /// Builds the syntax of a section payload, validating every template on the way.
    pub fn build(translations: &Translations) -> Result<Self, TemplateError> {
        Ok(Self { entries: build_entries(translations, None)? })
    }
}

fn build_entries(
    translations: &Translations,
    prefix: Option<&str>,
) -> Result<Vec<SyntaxEntry>, TemplateError> {
    translations
        .iter()
        .map(|(name, value)| {
            let key_path = prefix.map_or_else(|| name.to_string(), |p| format!("{p}.{name}"));
            build_entry(name, value, &key_path)
        })
        .collect()
}

fn build_entry(
    name: &str,
    value: &Translation,
    key_path: &str,
) -> Result<SyntaxEntry, TemplateError> {
    match value {
        Translation::Literal(text) => {
            Ok(SyntaxEntry::Literal { name: name.to_string(), text: text.clone() })
        }
        Translation::Template { text, params } => {
            validate_template(text, params).map_err(|source| TemplateError {
                key_path: key_path.to_string(),
                source,
            })?;
            Ok(SyntaxEntry::Callable {
                name: name.to_string(),
                text: text.clone(),
                params: params.clone(),
            })
        }
        Translation::Node(children) => Ok(SyntaxEntry::Block {
            name: name.to_string(),
            entries: build_entries(children, Some(key_path))?,
        }),
    }
}
