//! 言語モジュールの組み立て
//!
//! The base language publishes the canonical section list. Every other language is
//! assembled against that snapshot: a canonical section it defines itself becomes an
//! own field, anything else is inherited from the parent module.

use std::collections::HashMap;
use std::path::PathBuf;

use super::CatalogError;
use super::language::Language;
use crate::codegen::module::{
    FieldOrigin,
    LanguageModule,
    ModuleField,
};
use crate::codegen::{
    CanonicalSection,
    OwnSection,
    SyntaxTree,
    Target,
};
use crate::indexer::LoadedSection;

/// Section list published by the base language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseCatalog {
    shortcode: String,
    sections: Vec<CanonicalSection>,
}

impl BaseCatalog {
    #[must_use]
    pub fn shortcode(&self) -> &str {
        &self.shortcode
    }

    /// Canonical sections in the base language's load order.
    #[must_use]
    pub fn sections(&self) -> &[CanonicalSection] {
        &self.sections
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CanonicalSection> {
        self.sections.iter().find(|section| section.identity.key() == key)
    }
}

/// Shared output of the base language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedBase {
    pub catalog: BaseCatalog,
    pub sections_interface: String,
    pub language_interface: String,
}

/// Result of assembling one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledLanguage {
    pub shortcode: String,
    pub module_source: String,
    pub own_sections: usize,
    pub inherited_sections: usize,
    /// Set for the base language only.
    pub published: Option<PublishedBase>,
}

/// Collects the compiled sections of one language and renders its module.
#[derive(Debug)]
pub struct LanguageAssembler<'a, T: ?Sized> {
    target: &'a T,
    language: &'a Language,
    base: Option<&'a BaseCatalog>,
    own: Vec<OwnSection>,
    paths: HashMap<String, PathBuf>,
    names: HashMap<String, PathBuf>,
}

impl<'a, T: Target + ?Sized> LanguageAssembler<'a, T> {
    /// Assembler for the base language, whose sections become canonical.
    #[must_use]
    pub fn for_base(target: &'a T, language: &'a Language) -> Self {
        Self { target, language, base: None, own: Vec::new(), paths: HashMap::new(), names: HashMap::new() }
    }

    /// Assembler for a derived language, checked against the base snapshot.
    #[must_use]
    pub fn for_derived(target: &'a T, language: &'a Language, base: &'a BaseCatalog) -> Self {
        Self { target, language, base: Some(base), own: Vec::new(), paths: HashMap::new(), names: HashMap::new() }
    }

    /// セクションを検証して値と型に変換する
    ///
    /// # Errors
    /// - テンプレートのプレースホルダーが不正な場合
    /// - 同じキーのセクションが既に追加されている場合
    /// - 別のセクションと同じ変数名またはインターフェース名になる場合
    /// - 派生言語で、基本言語にないセクションや形の異なるセクションの場合
    pub fn add_section(&mut self, section: &LoadedSection) -> Result<(), CatalogError> {
        let shortcode = self.language.shortcode();
        let key = section.identity.key();

        if let Some(first) = self.paths.get(key) {
            return Err(CatalogError::DuplicateSection {
                shortcode: shortcode.to_string(),
                key: key.to_string(),
                first: first.clone(),
                second: section.path.clone(),
            });
        }
        for name in [section.identity.variable_name(), section.identity.interface_name()] {
            if let Some(first) = self.names.get(name) {
                return Err(CatalogError::DuplicateIdentifier {
                    shortcode: shortcode.to_string(),
                    name: name.to_string(),
                    first: first.clone(),
                    second: section.path.clone(),
                });
            }
        }

        let tree = SyntaxTree::build(&section.translations)
            .map_err(|e| CatalogError::from_template(shortcode, key, e))?;
        let interface_source = self.target.render_interface(&tree);

        if let Some(base) = self.base {
            let canonical = base.get(key).ok_or_else(|| CatalogError::UnknownSection {
                shortcode: shortcode.to_string(),
                key: key.to_string(),
            })?;
            if canonical.interface_source != interface_source {
                return Err(CatalogError::ShapeMismatch {
                    shortcode: shortcode.to_string(),
                    key: key.to_string(),
                });
            }
        }

        tracing::debug!(shortcode, key, "Compiled section");
        self.paths.insert(key.to_string(), section.path.clone());
        for name in [section.identity.variable_name(), section.identity.interface_name()] {
            self.names.insert(name.to_string(), section.path.clone());
        }
        self.own.push(OwnSection {
            identity: section.identity.clone(),
            value_source: self.target.render_value(&tree),
            interface_source,
            interpolates: self.target.needs_interpolation(&tree),
        });
        Ok(())
    }

    /// Renders the language module, and for the base language the shared files.
    #[must_use]
    pub fn finish(self) -> AssembledLanguage {
        let published_catalog = match self.base {
            Some(_) => None,
            None => Some(BaseCatalog {
                shortcode: self.language.shortcode().to_string(),
                sections: self
                    .own
                    .iter()
                    .map(|section| CanonicalSection {
                        identity: section.identity.clone(),
                        interface_source: section.interface_source.clone(),
                    })
                    .collect(),
            }),
        };
        let canonical = match (self.base, &published_catalog) {
            (Some(base), _) => base.sections(),
            (None, Some(published)) => published.sections(),
            (None, None) => &[],
        };

        let fields: Vec<ModuleField<'_>> = canonical
            .iter()
            .map(|section| {
                let origin = if self.paths.contains_key(section.identity.key()) {
                    FieldOrigin::Own
                } else {
                    FieldOrigin::Inherited
                };
                ModuleField { identity: &section.identity, origin }
            })
            .collect();
        let inherited_sections =
            fields.iter().filter(|field| field.origin == FieldOrigin::Inherited).count();

        let module = LanguageModule {
            shortcode: self.language.shortcode(),
            name: self.language.name(),
            parent: self.language.parent(),
            own_sections: &self.own,
            fields,
        };
        let module_source = self.target.language_module(&module);

        let published = published_catalog.map(|catalog| PublishedBase {
            sections_interface: self.target.sections_interface(catalog.sections()),
            language_interface: self.target.language_interface(catalog.sections()),
            catalog,
        });

        AssembledLanguage {
            shortcode: self.language.shortcode().to_string(),
            module_source,
            own_sections: self.own.len(),
            inherited_sections,
            published,
        }
    }
}
