//! Interpolation placeholder checks for parameterized translations.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `{{name}}` token wrapping a bare identifier.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\{\{([A-Za-z_$][A-Za-z0-9_$]*)\}\}").unwrap()
});

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap()
});

/// Words that cannot name a parameter in strict-mode TypeScript.
const RESERVED_WORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderError {
    /// The text references a placeholder that is not among the declared args.
    #[error("The translation \"{text}\" requires a value for {placeholder} but it was not declared")]
    UndeclaredPlaceholder { text: String, placeholder: String },

    #[error("Declared argument '{param}' is not a valid identifier")]
    InvalidParameter { param: String },

    #[error("Argument '{param}' is declared more than once")]
    DuplicateParameter { param: String },
}

/// Returns every placeholder name in `text`, in order of appearance, repeats included.
#[must_use]
pub fn extract_placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str())
        .collect()
}

/// Returns true if `name` is a bare identifier, which also makes it a plain property name.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Returns true if `name` can be used as a parameter of the generated callable.
#[must_use]
pub fn is_parameter_name(name: &str) -> bool {
    is_identifier(name) && !RESERVED_WORDS.contains(&name)
}

/// Checks a template against its declared parameters.
///
/// Every placeholder must be declared. A declared parameter that the text never uses is
/// accepted.
pub fn validate_template(text: &str, params: &[String]) -> Result<(), PlaceholderError> {
    let mut declared = HashSet::with_capacity(params.len());
    for param in params {
        if !is_parameter_name(param) {
            return Err(PlaceholderError::InvalidParameter { param: param.clone() });
        }
        if !declared.insert(param.as_str()) {
            return Err(PlaceholderError::DuplicateParameter { param: param.clone() });
        }
    }

    if let Some(placeholder) = extract_placeholders(text).into_iter().find(|p| !declared.contains(p))
    {
        return Err(PlaceholderError::UndeclaredPlaceholder {
            text: text.to_string(),
            placeholder: placeholder.to_string(),
        });
    }

    Ok(())
}
