//! Target independent description of the generated modules.

use crate::ir::section::SectionIdentity;

/// A section as published by the base language.
///
/// Derived languages are emitted against this list and type their own sections with
/// the interface rendered here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSection {
    pub identity: SectionIdentity,
    pub interface_source: String,
}

/// A section compiled from the language's own translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnSection {
    pub identity: SectionIdentity,
    pub value_source: String,
    pub interface_source: String,
    /// Whether the value source calls the interpolation helper.
    pub interpolates: bool,
}

/// Where a field of the language record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    Own,
    /// Reference into the parent language's module.
    Inherited,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleField<'a> {
    pub identity: &'a SectionIdentity,
    pub origin: FieldOrigin,
}

/// Everything needed to render one language module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageModule<'a> {
    pub shortcode: &'a str,
    pub name: &'a str,
    pub parent: Option<&'a str>,
    /// Own sections in load order.
    pub own_sections: &'a [OwnSection],
    /// One field per canonical section, in canonical order.
    pub fields: Vec<ModuleField<'a>>,
}

impl<'a> LanguageModule<'a> {
    pub fn inherited_fields(&self) -> impl Iterator<Item = &ModuleField<'a>> {
        self.fields.iter().filter(|field| field.origin == FieldOrigin::Inherited)
    }

    #[must_use]
    pub fn interpolates(&self) -> bool {
        self.own_sections.iter().any(|section| section.interpolates)
    }
}

/// Files produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact<'a> {
    Language(&'a str),
    SectionsInterface,
    LanguageInterface,
}
