//! 言語セットの検証と処理順序

use std::collections::{
    HashMap,
    HashSet,
};

use super::CatalogError;
use crate::config::LanguageConfig;

/// A configured language that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    shortcode: String,
    name: String,
    parent: Option<String>,
}

impl Language {
    #[must_use]
    pub fn shortcode(&self) -> &str {
        &self.shortcode
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` only for the base language.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub const fn is_base(&self) -> bool {
        self.parent.is_none()
    }
}

/// Validated languages in processing order.
///
/// The base language comes first and every other language comes after its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    languages: Vec<Language>,
}

impl LanguageSet {
    /// 設定された言語を検証し、処理順に並べる
    ///
    /// # Errors
    /// Checked per configured language: `DuplicateShortcode`, `MissingName`,
    /// `DuplicateName`, `IllegalParent`, `MissingParent`. Then `MissingBaseLanguage`,
    /// `UnknownParent` and `InheritanceCycle` for the set as a whole.
    pub fn new(configs: &[LanguageConfig], base_shortcode: &str) -> Result<Self, CatalogError> {
        let mut shortcodes = HashSet::new();
        let mut names: HashMap<&str, &str> = HashMap::new();
        let mut languages = Vec::with_capacity(configs.len());

        for config in configs {
            let shortcode = config.shortcode.as_str();
            if !shortcodes.insert(shortcode) {
                return Err(CatalogError::DuplicateShortcode { shortcode: shortcode.to_string() });
            }

            let name = match config.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name,
                _ => return Err(CatalogError::MissingName { shortcode: shortcode.to_string() }),
            };
            if let Some(first) = names.insert(name, shortcode) {
                return Err(CatalogError::DuplicateName {
                    shortcode: shortcode.to_string(),
                    name: name.to_string(),
                    first: first.to_string(),
                });
            }

            match (&config.extends, shortcode == base_shortcode) {
                (Some(parent), true) => {
                    return Err(CatalogError::IllegalParent {
                        shortcode: shortcode.to_string(),
                        parent: parent.clone(),
                    });
                }
                (None, false) => {
                    return Err(CatalogError::MissingParent {
                        shortcode: shortcode.to_string(),
                        base: base_shortcode.to_string(),
                    });
                }
                _ => {}
            }

            languages.push(Language {
                shortcode: shortcode.to_string(),
                name: name.to_string(),
                parent: config.extends.clone(),
            });
        }

        if !shortcodes.contains(base_shortcode) {
            return Err(CatalogError::MissingBaseLanguage { shortcode: base_shortcode.to_string() });
        }

        for language in &languages {
            if let Some(parent) = language.parent()
                && !shortcodes.contains(parent)
            {
                return Err(CatalogError::UnknownParent {
                    shortcode: language.shortcode.clone(),
                    parent: parent.to_string(),
                });
            }
        }

        Ok(Self { languages: Self::order(languages)? })
    }

    /// Repeatedly takes the first language, in configuration order, whose parent is
    /// already placed.
    fn order(mut pending: Vec<Language>) -> Result<Vec<Language>, CatalogError> {
        let mut ordered: Vec<Language> = Vec::with_capacity(pending.len());

        loop {
            let next = pending.iter().position(|language| match language.parent() {
                None => true,
                Some(parent) => ordered.iter().any(|placed| placed.shortcode == parent),
            });
            match next {
                Some(index) => ordered.push(pending.remove(index)),
                None => break,
            }
        }

        if pending.is_empty() {
            Ok(ordered)
        } else {
            Err(CatalogError::InheritanceCycle {
                shortcodes: pending.into_iter().map(|language| language.shortcode).collect(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    #[must_use]
    pub fn get(&self, shortcode: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.shortcode == shortcode)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn lang(shortcode: &str, name: Option<&str>, extends: Option<&str>) -> LanguageConfig {
        LanguageConfig::new(shortcode, name, extends)
    }

    fn order(set: &LanguageSet) -> Vec<&str> {
        set.iter().map(Language::shortcode).collect()
    }

    #[rstest]
    fn base_comes_first_and_children_follow_parents() {
        let configs = vec![
            lang("fr-ca", Some("Français (CA)"), Some("fr-fr")),
            lang("de", Some("Deutsch"), Some("en-gb")),
            lang("fr-fr", Some("Français"), Some("en-gb")),
            lang("en-gb", Some("English (GB)"), None),
        ];

        let set = LanguageSet::new(&configs, "en-gb").unwrap();

        assert_eq!(order(&set), vec!["en-gb", "de", "fr-fr", "fr-ca"]);
        assert_that!(set.get("en-gb").unwrap().is_base(), eq(true));
        assert_that!(set.get("fr-ca").unwrap().parent(), some(eq("fr-fr")));
        assert_that!(set.len(), eq(4));
    }

    #[rstest]
    fn names_are_trimmed() {
        let configs = vec![lang("en-gb", Some("  English  "), None)];

        let set = LanguageSet::new(&configs, "en-gb").unwrap();

        assert_that!(set.get("en-gb").unwrap().name(), eq("English"));
    }

    #[rstest]
    fn duplicate_shortcode() {
        let configs = vec![lang("en-gb", Some("English"), None), lang("en-gb", Some("Other"), None)];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(result, Err(CatalogError::DuplicateShortcode { .. })));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some("   "))]
    fn missing_name(#[case] name: Option<&str>) {
        let configs = vec![lang("en-gb", Some("English"), None), lang("de", name, Some("en-gb"))];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(result, Err(CatalogError::MissingName { ref shortcode }) if shortcode == "de"));
    }

    #[rstest]
    fn duplicate_name_names_first_user() {
        let configs = vec![
            lang("en-gb", Some("English"), None),
            lang("en-us", Some("English"), Some("en-gb")),
        ];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(
            result,
            Err(CatalogError::DuplicateName { ref shortcode, ref first, .. })
                if shortcode == "en-us" && first == "en-gb"
        ));
    }

    #[rstest]
    fn base_with_parent_is_illegal() {
        let configs = vec![
            lang("de", Some("Deutsch"), Some("en-gb")),
            lang("en-gb", Some("English"), Some("de")),
        ];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(result, Err(CatalogError::IllegalParent { .. })));
    }

    #[rstest]
    fn non_base_without_parent() {
        let configs = vec![lang("en-gb", Some("English"), None), lang("de", Some("Deutsch"), None)];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(result, Err(CatalogError::MissingParent { ref shortcode, .. }) if shortcode == "de"));
    }

    #[rstest]
    fn missing_base_language() {
        let configs = vec![lang("en-gb", Some("English"), None)];

        let result = LanguageSet::new(&configs, "en-us");

        // en-gb has no parent but is not the base
        assert!(matches!(result, Err(CatalogError::MissingParent { .. })));

        let result = LanguageSet::new(&[], "en-us");
        assert!(matches!(result, Err(CatalogError::MissingBaseLanguage { .. })));
    }

    #[rstest]
    fn unknown_parent() {
        let configs = vec![
            lang("en-gb", Some("English"), None),
            lang("fr-ca", Some("Français (CA)"), Some("fr-fr")),
        ];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(
            result,
            Err(CatalogError::UnknownParent { ref parent, .. }) if parent == "fr-fr"
        ));
    }

    #[rstest]
    fn inheritance_cycle() {
        let configs = vec![
            lang("en-gb", Some("English"), None),
            lang("a", Some("A"), Some("b")),
            lang("b", Some("B"), Some("a")),
            lang("c", Some("C"), Some("en-gb")),
        ];

        let result = LanguageSet::new(&configs, "en-gb");

        assert!(matches!(
            result,
            Err(CatalogError::InheritanceCycle { ref shortcodes }) if shortcodes == &["a", "b"]
        ));
    }
}
