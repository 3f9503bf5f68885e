//! Version ranges over a single framework family.

use crate::framework::FrameworkIdentity;

/// An inclusive version range within one identifier and profile.
///
/// Both bounds must share identifier and profile; only the version differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameworkRange {
    min: FrameworkIdentity,
    max: FrameworkIdentity,
}

impl FrameworkRange {
    /// A range between two frameworks of the same family.
    pub fn new(min: FrameworkIdentity, max: FrameworkIdentity) -> Self {
        debug_assert!(
            min.name() == max.name() && min.profile() == max.profile(),
            "range bounds must share identifier and profile"
        );
        Self { min, max }
    }

    /// A range holding a single framework.
    pub fn exact(framework: FrameworkIdentity) -> Self {
        Self {
            min: framework.clone(),
            max: framework,
        }
    }

    /// Lower bound.
    pub fn min(&self) -> &FrameworkIdentity {
        &self.min
    }

    /// Upper bound.
    pub fn max(&self) -> &FrameworkIdentity {
        &self.max
    }

    /// True when `framework` has the range's identifier and profile and a
    /// version within the bounds.
    pub fn satisfies(&self, framework: &FrameworkIdentity) -> bool {
        framework.name() == self.min.name()
            && framework.profile() == self.min.profile()
            && self.min.version() <= framework.version()
            && framework.version() <= self.max.version()
    }
}

/// A one-way compatibility edge: projects in `project` may consume packages
/// in `supports`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompatibilityMapping {
    /// Project frameworks the edge applies to.
    pub project: FrameworkRange,
    /// Package frameworks those projects may consume.
    pub supports: FrameworkRange,
}

impl CompatibilityMapping {
    /// Build a mapping from its two ranges.
    pub fn new(project: FrameworkRange, supports: FrameworkRange) -> Self {
        Self { project, supports }
    }
}
