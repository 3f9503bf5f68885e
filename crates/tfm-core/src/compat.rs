//! Project/package compatibility.

use crate::expander::FrameworkExpander;
use crate::framework::{FrameworkIdentity, PortableProfile};
use crate::provider::FrameworkNameProvider;

/// Decides whether a project may consume a package built for another
/// framework.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityProvider<'a> {
    names: &'a FrameworkNameProvider,
    expander: FrameworkExpander<'a>,
}

impl<'a> CompatibilityProvider<'a> {
    /// Check compatibility using the given tables.
    pub fn new(names: &'a FrameworkNameProvider) -> Self {
        Self {
            names,
            expander: FrameworkExpander::new(names),
        }
    }

    /// True when a project targeting `project` can use assets built for
    /// `package`.
    pub fn is_compatible(&self, project: &FrameworkIdentity, package: &FrameworkIdentity) -> bool {
        if let Some(result) = special_compatibility(project, package) {
            return result;
        }

        if project == package {
            return true;
        }

        let result = if project.is_portable() || package.is_portable() {
            self.is_portable_compatible(project, package)
        } else {
            self.is_compatible_by_expansion(project, package)
        };

        tracing::trace!(
            project = %self.names.short_folder_name(project),
            package = %self.names.short_folder_name(package),
            result,
            "Checked compatibility"
        );

        result
    }

    fn is_compatible_by_expansion(&self, project: &FrameworkIdentity, package: &FrameworkIdentity) -> bool {
        let mut targets = vec![project.clone()];
        targets.extend(self.expander.expand_transitive(project));

        let mut candidates = vec![package.clone()];
        candidates.extend(self.names.equivalent_closure(package));

        candidates
            .iter()
            .any(|candidate| targets.iter().any(|target| satisfies(target, candidate)))
    }

    fn is_portable_compatible(&self, project: &FrameworkIdentity, package: &FrameworkIdentity) -> bool {
        match (project.portable_profile(), package.portable_profile()) {
            // a portable project only ever consumes portable packages
            (Some(_), None) => false,
            (None, Some(package_profile)) => package_profile
                .frameworks()
                .iter()
                .any(|framework| self.is_compatible(project, framework)),
            (Some(project_profile), Some(package_profile)) => {
                self.is_portable_pair_compatible(project_profile, package_profile)
            }
            (None, None) => false,
        }
    }

    /// Every required member of the project profile must be served by some
    /// member of the package profile.
    fn is_portable_pair_compatible(&self, project: &PortableProfile, package: &PortableProfile) -> bool {
        let required: Vec<&FrameworkIdentity> = project.required().collect();
        if required.len() > package.frameworks().len() {
            return false;
        }

        required.iter().all(|member| {
            package.frameworks().iter().any(|candidate| {
                self.is_placeholder_match(member, candidate) || self.is_compatible(member, candidate)
            })
        })
    }

    /// An unversioned placeholder (`monoandroid`) stands for every version of
    /// its platform.
    fn is_placeholder_match(&self, member: &FrameworkIdentity, candidate: &FrameworkIdentity) -> bool {
        member.version().is_empty()
            && self.names.is_placeholder(member.name())
            && member.name() == candidate.name()
    }
}

/// Rules for `Any`, `Agnostic` and `Unsupported`. `None` when both sides are
/// specific frameworks.
fn special_compatibility(project: &FrameworkIdentity, package: &FrameworkIdentity) -> Option<bool> {
    if project.is_specific() && package.is_specific() {
        return None;
    }

    let result = if package.is_any() {
        true
    } else if project.is_unsupported() {
        package.is_unsupported()
    } else if package.is_unsupported() {
        false
    } else if project.is_any() || package.is_agnostic() {
        true
    } else {
        // an agnostic project against a specific package
        false
    };

    Some(result)
}

/// Same family, and the target is at least as new as the candidate.
fn satisfies(target: &FrameworkIdentity, candidate: &FrameworkIdentity) -> bool {
    target.name() == candidate.name()
        && target.profile() == candidate.profile()
        && candidate.version() <= target.version()
        && candidate
            .platform_version()
            .is_none_or(|needed| target.platform_version().is_some_and(|have| have >= needed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(project: &str, package: &str) -> bool {
        let names = FrameworkNameProvider::with_defaults();
        let project = names.parse(project).unwrap();
        let package = names.parse(package).unwrap();
        CompatibilityProvider::new(&names).is_compatible(&project, &package)
    }

    #[test]
    fn test_special_frameworks() {
        assert!(check("net45", "any"));
        assert!(check("any", "net45"));
        assert!(check("net45", "agnostic"));
        assert!(!check("net45", "unsupported"));
        assert!(!check("unsupported", "net45"));
        assert!(check("unsupported", "any"));
        assert!(check("unsupported", "unsupported"));
        assert!(!check("agnostic", "net45"));
    }

    #[test]
    fn test_versions_within_family() {
        assert!(check("net45", "net40"));
        assert!(check("net45", "net45"));
        assert!(!check("net40", "net45"));
        assert!(check("net451", "net45"));
    }

    #[test]
    fn test_profiles() {
        assert!(check("net45", "net40-client"));
        assert!(check("net40-client", "net40"));
        assert!(!check("net45-cf", "net40"));
    }

    #[test]
    fn test_platform_version_required() {
        let names = FrameworkNameProvider::with_defaults();
        let compat = CompatibilityProvider::new(&names);
        let uap = names.parse("uap10.0").unwrap();
        let pinned = uap
            .clone()
            .with_platform_version(tfm_schema::FrameworkVersion::new(10, 0, 15064, 0));

        assert!(compat.is_compatible(&pinned, &uap));
        assert!(!compat.is_compatible(&uap, &pinned));
    }

    #[test]
    fn test_one_way_mappings() {
        assert!(check("uap10.0", "win81"));
        assert!(!check("win81", "uap10.0"));
        assert!(check("dnxcore50", "aspnetcore50"));
        assert!(!check("aspnetcore50", "dnxcore50"));
        assert!(check("dnx451", "net45"));
        assert!(!check("net45", "dnx451"));
    }

    #[test]
    fn test_portable() {
        assert!(check("net45", "portable-net45+win8"));
        assert!(check("win81", "portable-net45+win8"));
        assert!(!check("portable-net45+win8", "net45"));
        assert!(check("portable-net45+win8", "portable-net4+win8"));
        assert!(!check("portable-net4+win8", "portable-net45+win8"));
        // optional members of the package profile count as candidates
        assert!(check("monoandroid40", "portable-net45+win8"));
    }

    #[test]
    fn test_portable_placeholder_member() {
        assert!(check("portable-monoandroid+monotouch", "portable-monoandroid10+monotouch10"));
    }
}
