//! CLI command implementations for Quire.

pub mod keys;
pub mod token;
