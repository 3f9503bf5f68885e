//! Shared leaf types for the `tfm` target-framework engine.
//!
//! Everything here is plain data: versions, identifier names, the parse error
//! taxonomy and the on-disk schema of mapping overrides. The compatibility
//! logic lives in `tfm-core`.

pub mod config;
pub mod error;
pub mod identifier;
pub mod version;

// Re-exports
pub use config::{ConfigError, MappingOverrides};
pub use error::ParseError;
pub use identifier::FrameworkName;
pub use version::FrameworkVersion;
