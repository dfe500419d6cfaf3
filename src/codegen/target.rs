//! Output syntax abstraction.

use super::ast::SyntaxTree;
use super::module::{
    Artifact,
    CanonicalSection,
    LanguageModule,
};

/// Renders compiled sections and modules in one output language.
pub trait Target {
    /// File name of an artifact, relative to the output directory.
    fn file_name(&self, artifact: Artifact<'_>) -> String;

    /// Value source of one section: the body of its constant.
    fn render_value(&self, tree: &SyntaxTree) -> String;

    /// Interface source of one section: the body of its type declaration.
    fn render_interface(&self, tree: &SyntaxTree) -> String;

    /// Returns true if the rendered value of `tree` needs the interpolation helper.
    fn needs_interpolation(&self, tree: &SyntaxTree) -> bool;

    fn language_module(&self, module: &LanguageModule<'_>) -> String;

    /// Declarations shared by every language, one type per canonical section.
    fn sections_interface(&self, sections: &[CanonicalSection]) -> String;

    /// The language record type, one field per canonical section.
    fn language_interface(&self, sections: &[CanonicalSection]) -> String;
}
