//! Section identity derived from translation file paths.

use thiserror::Error;

/// Raised when a path segment carries no usable characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path segment '{segment}' has no alphanumeric characters")]
pub struct InvalidSegment {
    pub segment: String,
}

/// Lookup key, variable name and interface name of one section.
///
/// All three names are pure functions of the segments appended so far.
/// [`SectionIdentity::extend`] never mutates `self`, so a directory walk can hand the
/// same parent identity to every sibling without them seeing each other's segments.
///
/// # Examples
/// ```
/// use i18n_catalog_compiler::ir::section::SectionIdentity;
///
/// let identity = SectionIdentity::root()
///     .extend("components")
///     .and_then(|id| id.extend("tabs"))
///     .and_then(|id| id.extend("repositoryBranches"))
///     .unwrap();
///
/// assert_eq!(identity.key(), "components-tabs-repository-branches");
/// assert_eq!(identity.variable_name(), "_componentsTabsRepositoryBranches");
/// assert_eq!(identity.interface_name(), "IComponentsTabsRepositoryBranches");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionIdentity {
    key: String,
    variable_name: String,
    interface_name: String,
}

/// Prefix of every section variable name; a bare `_` is the empty identity.
const VARIABLE_PREFIX: &str = "_";
/// Marker letter in front of every interface name.
const INTERFACE_PREFIX: &str = "I";

impl Default for SectionIdentity {
    fn default() -> Self {
        Self::root()
    }
}

impl SectionIdentity {
    /// Identity of a language root, before any segment is appended.
    #[must_use]
    pub fn root() -> Self {
        Self {
            key: String::new(),
            variable_name: VARIABLE_PREFIX.to_string(),
            interface_name: INTERFACE_PREFIX.to_string(),
        }
    }

    /// Returns a new identity with `segment` appended.
    ///
    /// The raw segment is split at camel-case humps, every word is lowercased and
    /// stripped of non-alphanumeric characters, then the words are joined onto the
    /// key with `-`, onto the variable name in lowerCamel and onto the interface
    /// name in PascalCase.
    pub fn extend(&self, segment: &str) -> Result<Self, InvalidSegment> {
        let words = segment_words(segment);
        if words.is_empty() {
            return Err(InvalidSegment { segment: segment.to_string() });
        }

        let mut extended = self.clone();
        for word in &words {
            extended.push_word(word);
        }
        Ok(extended)
    }

    /// Appends a path made of several segments, outermost first.
    pub fn extend_all<'a, I>(&self, segments: I) -> Result<Self, InvalidSegment>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments.into_iter().try_fold(self.clone(), |identity, segment| identity.extend(segment))
    }

    /// Returns an independent copy, identical to `clone`.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    #[must_use]
    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key.is_empty()
    }

    fn push_word(&mut self, word: &str) {
        if !self.key.is_empty() {
            self.key.push('-');
        }
        self.key.push_str(word);

        if self.variable_name.len() > VARIABLE_PREFIX.len() {
            self.variable_name.push_str(&capitalize(word));
        } else {
            self.variable_name.push_str(word);
        }

        self.interface_name.push_str(&capitalize(word));
    }
}

/// Splits a raw segment into normalized words.
///
/// `repositoryBranches` becomes `["repository", "branches"]`, `user_profile` becomes
/// `["userprofile"]`.
fn segment_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_is_lower_or_digit = false;

    for ch in segment.chars() {
        if ch.is_ascii_uppercase() && previous_is_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_is_lower_or_digit = ch.is_ascii_lowercase() || ch.is_ascii_digit();

        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn root_identity_has_sentinels() {
        let identity = SectionIdentity::root();

        assert_that!(identity.key(), eq(""));
        assert_that!(identity.variable_name(), eq("_"));
        assert_that!(identity.interface_name(), eq("I"));
        assert_that!(identity.is_root(), eq(true));
    }

    #[rstest]
    fn extend_joins_segments() {
        let identity = SectionIdentity::root()
            .extend_all(["components", "tabs", "repository", "branches"])
            .unwrap();

        assert_that!(identity.key(), eq("components-tabs-repository-branches"));
        assert_that!(identity.variable_name(), eq("_componentsTabsRepositoryBranches"));
        assert_that!(identity.interface_name(), eq("IComponentsTabsRepositoryBranches"));
    }

    #[rstest]
    #[case::camel_case("repositoryBranches", "repository-branches")]
    #[case::pascal_case("RepositoryBranches", "repository-branches")]
    #[case::upper_acronym("HTTPStatus", "httpstatus")]
    #[case::digit_hump("tab2Title", "tab2-title")]
    #[case::punctuation("user_profile.v2", "userprofilev2")]
    #[case::dashes("error-pages", "errorpages")]
    fn extend_normalizes_raw_segment(#[case] segment: &str, #[case] expected_key: &str) {
        let identity = SectionIdentity::root().extend(segment).unwrap();

        assert_that!(identity.key(), eq(expected_key));
    }

    #[rstest]
    #[case::empty("")]
    #[case::only_symbols("--__..")]
    #[case::non_ascii("日本語")]
    fn extend_rejects_segment_without_alphanumerics(#[case] segment: &str) {
        let result = SectionIdentity::root().extend(segment);

        assert_that!(result, err(field!(InvalidSegment.segment, eq(segment))));
    }

    #[rstest]
    fn extend_leaves_parent_untouched() {
        let parent = SectionIdentity::root().extend("components").unwrap();

        let left = parent.extend("tabs").unwrap();
        let right = parent.copy().extend("dialogs").unwrap();

        assert_that!(parent.key(), eq("components"));
        assert_that!(left.key(), eq("components-tabs"));
        assert_that!(right.key(), eq("components-dialogs"));
        assert_that!(right.variable_name(), eq("_componentsDialogs"));
    }

    #[rstest]
    fn branching_order_does_not_change_result() {
        let direct = SectionIdentity::root().extend_all(["a", "b", "c"]).unwrap();

        let base = SectionIdentity::root().extend("a").unwrap();
        let _sibling = base.extend("zzz").unwrap();
        let via_copy = base.copy().extend("b").unwrap().copy().extend("c").unwrap();

        assert_eq!(via_copy, direct);
    }

    #[rstest]
    fn single_segment_variable_name_is_not_capitalized() {
        let identity = SectionIdentity::root().extend("Common").unwrap();

        assert_that!(identity.variable_name(), eq("_common"));
        assert_that!(identity.interface_name(), eq("ICommon"));
    }
}
