//! 翻訳ツリーのインデックス
/// Translation file pattern matcher
pub mod matcher;
/// Translation tree loader
pub mod tree;

pub use matcher::{
    MatcherError,
    TranslationFileMatcher,
};
pub use tree::{
    LoadedSection,
    TreeLoader,
};
