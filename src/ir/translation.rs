//! 翻訳ペイロードの中間表現

/// One value inside a translation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Plain string.
    Literal(String),
    /// String with `{{name}}` placeholders filled at call time.
    Template {
        text: String,
        /// Declared parameter names, in call order.
        params: Vec<String>,
    },
    /// Named children in document order.
    Node(Translations),
}

/// Ordered mapping of entry names to translation values.
///
/// Order follows the source document so repeated runs emit identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: Vec<(String, Translation)>,
}

impl Translations {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Appends an entry, replacing an existing one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Translation) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Translation> {
        self.entries.iter().find(|(existing, _)| existing == name).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Translation)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Translation)> for Translations {
    fn from_iter<I: IntoIterator<Item = (K, Translation)>>(iter: I) -> Self {
        let mut translations = Self::new();
        for (name, value) in iter {
            translations.insert(name, value);
        }
        translations
    }
}

impl Translation {
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    #[must_use]
    pub fn template<I, S>(text: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Template { text: text.into(), params: params.into_iter().map(Into::into).collect() }
    }

    #[must_use]
    pub fn node<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Node(children.into_iter().collect())
    }
}
