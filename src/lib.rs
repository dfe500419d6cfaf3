//! i18n-catalog-compiler
//!
//! 言語ごとの翻訳ツリーから型付きの翻訳モジュールを生成するコンパイラ

pub mod catalog;
pub mod codegen;
pub mod config;
pub mod indexer;
pub mod input;
pub mod ir;
mod test_utils;

pub use catalog::{
    CatalogError,
    CatalogGenerator,
};
