//! Command modules - one file per CLI command

pub mod compat;
pub mod completions;
pub mod expand;
pub mod nearest;
pub mod parse;
pub mod reduce;
