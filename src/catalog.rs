//! 翻訳カタログのコンパイル
/// Language module assembly
pub mod assembler;
/// Run level errors
pub mod error;
/// Compilation run
pub mod generator;
/// Language set validation
pub mod language;

pub use assembler::{
    AssembledLanguage,
    BaseCatalog,
    LanguageAssembler,
};
pub use error::CatalogError;
pub use generator::{
    CatalogGenerator,
    GeneratedCatalog,
    GeneratedFile,
    GenerationReport,
    LanguageReport,
};
pub use language::{
    Language,
    LanguageSet,
};
