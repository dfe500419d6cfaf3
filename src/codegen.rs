//! コード生成
/// Target independent section syntax
pub mod ast;
/// Generated module descriptions
pub mod module;
/// Placeholder validation
pub mod placeholder;
/// Output syntax abstraction
pub mod target;
/// TypeScript target
pub mod typescript;

pub use ast::{
    SyntaxEntry,
    SyntaxTree,
    TemplateError,
};
pub use module::{
    Artifact,
    CanonicalSection,
    OwnSection,
};
pub use placeholder::{
    PlaceholderError,
    validate_template,
};
pub use target::Target;
pub use typescript::{
    RuntimeImports,
    TypeScript,
};
