//! Inputs: filesystem access and translation file parsing.
pub mod fs;
pub mod translation;
