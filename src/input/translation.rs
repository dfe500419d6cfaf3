//! Translation file input definitions

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use crate::ir::translation::{
    Translation,
    Translations,
};

/// Member of the file's top-level object that holds the payload.
pub const PAYLOAD_FIELD: &str = "translations";

/// Errors raised while turning a translation file into a payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Failed to parse JSON: {0}")]
    Parse(String),

    #[error("No \"translations\" object found in the file")]
    MissingPayload,

    #[error("Found a top-level string value; the payload root must be an object")]
    RootLiteral,

    #[error("Unsupported {kind} value at '{key_path}'")]
    UnsupportedValue { key_path: String, kind: &'static str },

    #[error("Template at '{key_path}' has invalid args: {message}")]
    InvalidArgs { key_path: String, message: String },
}

/// Parses the text of a translation file into its payload.
///
/// The document must be an object with a [`PAYLOAD_FIELD`] member:
///
/// ```json
/// {
///   "translations": {
///     "title": "Branches",
///     "greeting": { "value": "Hello {{name}}", "args": ["name"] }
///   }
/// }
/// ```
pub fn parse_translation_file(content: &str) -> Result<Translations, TranslationError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| TranslationError::Parse(e.to_string()))?;

    let payload = document
        .as_object()
        .and_then(|object| object.get(PAYLOAD_FIELD))
        .ok_or(TranslationError::MissingPayload)?;

    match payload {
        Value::Object(map) => convert_object(map, None),
        Value::String(_) => Err(TranslationError::RootLiteral),
        Value::Null => Err(TranslationError::MissingPayload),
        other => Err(TranslationError::UnsupportedValue {
            key_path: PAYLOAD_FIELD.to_string(),
            kind: value_kind(other),
        }),
    }
}

fn convert_object(
    map: &Map<String, Value>,
    prefix: Option<&str>,
) -> Result<Translations, TranslationError> {
    let mut translations = Translations::new();
    for (key, value) in map {
        let key_path = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        translations.insert(key.clone(), convert_value(value, &key_path)?);
    }
    Ok(translations)
}

fn convert_value(value: &Value, key_path: &str) -> Result<Translation, TranslationError> {
    match value {
        Value::String(text) => Ok(Translation::Literal(text.clone())),
        Value::Object(map) if is_template(map) => convert_template(map, key_path),
        Value::Object(map) => Ok(Translation::Node(convert_object(map, Some(key_path))?)),
        other => Err(TranslationError::UnsupportedValue {
            key_path: key_path.to_string(),
            kind: value_kind(other),
        }),
    }
}

/// An object is a template when it holds a string `value` and nothing but `args` besides.
fn is_template(map: &Map<String, Value>) -> bool {
    map.get("value").is_some_and(Value::is_string)
        && map.keys().all(|key| key == "value" || key == "args")
}

fn convert_template(
    map: &Map<String, Value>,
    key_path: &str,
) -> Result<Translation, TranslationError> {
    let text = map.get("value").and_then(Value::as_str).unwrap_or_default().to_string();

    let params = match map.get("args") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(ToString::to_string).ok_or_else(|| {
                    TranslationError::InvalidArgs {
                        key_path: key_path.to_string(),
                        message: format!("expected a string, found {}", value_kind(item)),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(TranslationError::InvalidArgs {
                key_path: key_path.to_string(),
                message: format!("expected an array, found {}", value_kind(other)),
            });
        }
    };

    Ok(Translation::Template { text, params })
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
