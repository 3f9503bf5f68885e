//! Target framework parsing, compatibility and nearest-match selection.
//!
//! The engine answers three questions about package target frameworks:
//!
//! - what a folder name or long name denotes ([`parse`]),
//! - whether a project may consume a package ([`is_compatible`]),
//! - which of a package's frameworks a project should use ([`get_nearest`]).
//!
//! All of it is driven by read-only mapping tables merged into a
//! [`FrameworkNameProvider`]. The built-in tables are available process-wide
//! through [`default_provider`]; a provider with user overrides is built
//! with [`FrameworkNameProvider::with_overrides`].
//!
//! ```
//! let project = tfm_core::parse("net451").unwrap();
//! let candidates = ["net35", "net40", "net45", "net453"]
//!     .map(|t| tfm_core::parse(t).unwrap());
//!
//! let nearest = tfm_core::get_nearest(&project, &candidates).unwrap();
//! assert_eq!(nearest.to_short_folder_name(), "net45");
//! ```

pub mod compat;
pub mod expander;
mod format;
pub mod framework;
pub mod mappings;
pub mod overrides;
mod parse;
pub mod portable;
pub mod provider;
pub mod range;
pub mod reducer;

use std::sync::LazyLock;

// Re-exports
pub use compat::CompatibilityProvider;
pub use expander::FrameworkExpander;
pub use framework::{FrameworkIdentity, PortableProfile, Profile};
pub use mappings::{DefaultFrameworkMappings, FrameworkMappings};
pub use overrides::OverrideMappings;
pub use portable::{DefaultPortableFrameworkMappings, PortableFrameworkMappings};
pub use provider::FrameworkNameProvider;
pub use range::{CompatibilityMapping, FrameworkRange};
pub use reducer::FrameworkReducer;
pub use tfm_schema::{ConfigError, FrameworkName, FrameworkVersion, MappingOverrides, ParseError};

static DEFAULT_PROVIDER: LazyLock<FrameworkNameProvider> =
    LazyLock::new(FrameworkNameProvider::with_defaults);

/// The provider over the built-in tables, built on first use.
pub fn default_provider() -> &'static FrameworkNameProvider {
    &DEFAULT_PROVIDER
}

/// Parse a folder name or long name with the built-in tables.
///
/// # Errors
///
/// Returns a [`ParseError`] for empty or malformed tokens.
pub fn parse(token: &str) -> Result<FrameworkIdentity, ParseError> {
    default_provider().parse(token)
}

/// True when a project targeting `project` can use assets built for
/// `package`, according to the built-in tables.
pub fn is_compatible(project: &FrameworkIdentity, package: &FrameworkIdentity) -> bool {
    CompatibilityProvider::new(default_provider()).is_compatible(project, package)
}

/// The candidate a project targeting `project` should use, according to the
/// built-in tables.
pub fn get_nearest(
    project: &FrameworkIdentity,
    candidates: &[FrameworkIdentity],
) -> Option<FrameworkIdentity> {
    FrameworkReducer::new(default_provider()).get_nearest(project, candidates)
}
