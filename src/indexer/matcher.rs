//! Translation file pattern matcher.

use std::path::Path;

use globset::{
    Glob,
    GlobMatcher,
};

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidTranslationPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Decides which files of a translation tree are loaded.
///
/// The pattern is matched against the file name only, so nesting depth does not
/// matter.
#[derive(Debug, Clone)]
pub struct TranslationFileMatcher {
    matcher: GlobMatcher,
}

impl TranslationFileMatcher {
    /// # Errors
    /// パターンが glob として不正な場合
    pub fn new(pattern: &str) -> Result<Self, MatcherError> {
        let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidTranslationPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { matcher: glob.compile_matcher() })
    }

    #[must_use]
    pub fn is_translation_file(&self, file_name: &str) -> bool {
        self.matcher.is_match(Path::new(file_name))
    }
}
