//! 中間表現
pub mod section;
pub mod translation;
