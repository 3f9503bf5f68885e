//! Framework identities and profiles.
//!
//! A [`FrameworkIdentity`] is the parsed, canonical form of a target
//! framework token. Identities are plain values: comparing two of them never
//! consults the mapping tables, only their identifier, version, profile and
//! optional platform version.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tfm_schema::identifier::{ids, special};
use tfm_schema::{FrameworkName, FrameworkVersion};

/// The profile part of a framework.
///
/// Most frameworks carry a plain profile string (`Client`,
/// `CompactFramework`, `WindowsPhone71`, or empty for the full framework).
/// `.NETPortable` frameworks carry a resolved set of component frameworks
/// instead.
#[derive(Debug, Clone)]
pub enum Profile {
    /// A named profile, compared case-insensitively. Empty means none.
    Exact(String),
    /// A portable class library profile.
    Portable(PortableProfile),
}

impl Profile {
    /// The empty profile.
    pub fn none() -> Self {
        Self::Exact(String::new())
    }

    /// True for an empty exact profile.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Exact(p) if p.is_empty())
    }

    /// The profile string for exact profiles, `None` for portable ones.
    pub fn as_exact(&self) -> Option<&str> {
        match self {
            Self::Exact(p) => Some(p),
            Self::Portable(_) => None,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::none()
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a.eq_ignore_ascii_case(b),
            (Self::Portable(a), Self::Portable(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Profile {}

impl Hash for Profile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Exact(p) => {
                state.write_u8(0);
                for b in p.bytes() {
                    state.write_u8(b.to_ascii_lowercase());
                }
                state.write_u8(0xff);
            }
            Self::Portable(p) => {
                state.write_u8(1);
                p.hash(state);
            }
        }
    }
}

impl PartialOrd for Profile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Profile {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => {
                let a = a.bytes().map(|c| c.to_ascii_lowercase());
                let b = b.bytes().map(|c| c.to_ascii_lowercase());
                a.cmp(b)
            }
            (Self::Portable(a), Self::Portable(b)) => a.cmp(b),
            (Self::Exact(_), Self::Portable(_)) => Ordering::Less,
            (Self::Portable(_), Self::Exact(_)) => Ordering::Greater,
        }
    }
}

/// The component frameworks of a portable class library.
///
/// `frameworks` holds every component in canonical order, including the
/// optional placeholders listed in `optional`. A profile resolved from the
/// portable profile table also carries its profile number; two portable
/// profiles with the same number are always equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortableProfile {
    number: Option<u32>,
    frameworks: Vec<FrameworkIdentity>,
    optional: Vec<FrameworkIdentity>,
}

impl PortableProfile {
    /// A profile from the numbered portable profile table.
    pub fn numbered(
        number: u32,
        required: Vec<FrameworkIdentity>,
        optional: Vec<FrameworkIdentity>,
    ) -> Self {
        let mut frameworks = required;
        frameworks.extend(optional.iter().cloned());
        Self::canonical(Some(number), frameworks, optional)
    }

    /// A profile written as an explicit framework list that matches no
    /// numbered profile. `optional` must be a subset of `frameworks`.
    pub fn from_list(frameworks: Vec<FrameworkIdentity>, optional: Vec<FrameworkIdentity>) -> Self {
        Self::canonical(None, frameworks, optional)
    }

    fn canonical(
        number: Option<u32>,
        mut frameworks: Vec<FrameworkIdentity>,
        mut optional: Vec<FrameworkIdentity>,
    ) -> Self {
        frameworks.sort();
        frameworks.dedup();
        optional.sort();
        optional.dedup();
        optional.retain(|o| frameworks.contains(o));
        Self {
            number,
            frameworks,
            optional,
        }
    }

    /// The profile number, when the profile came from the table.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// `ProfileNNN` for numbered profiles.
    pub fn profile_name(&self) -> Option<String> {
        self.number.map(|n| format!("Profile{n}"))
    }

    /// Every component framework, optional placeholders included.
    pub fn frameworks(&self) -> &[FrameworkIdentity] {
        &self.frameworks
    }

    /// The optional placeholder frameworks.
    pub fn optional(&self) -> &[FrameworkIdentity] {
        &self.optional
    }

    /// Component frameworks that must be matched.
    pub fn required(&self) -> impl Iterator<Item = &FrameworkIdentity> {
        self.frameworks
            .iter()
            .filter(|f| !self.optional.contains(f))
    }

    /// True when `framework` is one of the optional placeholders.
    pub fn is_optional(&self, framework: &FrameworkIdentity) -> bool {
        self.optional.contains(framework)
    }
}

/// A parsed target framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameworkIdentity {
    name: FrameworkName,
    version: FrameworkVersion,
    profile: Profile,
    platform_version: Option<FrameworkVersion>,
}

impl FrameworkIdentity {
    /// A framework with no profile.
    pub fn new(name: impl Into<FrameworkName>, version: FrameworkVersion) -> Self {
        Self {
            name: name.into(),
            version,
            profile: Profile::none(),
            platform_version: None,
        }
    }

    /// A framework with a named profile.
    pub fn with_profile(
        name: impl Into<FrameworkName>,
        version: FrameworkVersion,
        profile: &str,
    ) -> Self {
        Self {
            name: name.into(),
            version,
            profile: Profile::Exact(profile.to_string()),
            platform_version: None,
        }
    }

    /// A `.NETPortable` framework.
    pub fn portable(version: FrameworkVersion, profile: PortableProfile) -> Self {
        Self {
            name: FrameworkName::new(ids::PORTABLE),
            version,
            profile: Profile::Portable(profile),
            platform_version: None,
        }
    }

    /// The wildcard framework every project can consume.
    pub fn any() -> Self {
        Self::new(special::ANY, FrameworkVersion::EMPTY)
    }

    /// The framework of content-only packages.
    pub fn agnostic() -> Self {
        Self::new(special::AGNOSTIC, FrameworkVersion::EMPTY)
    }

    /// An unknown or invalid framework.
    pub fn unsupported() -> Self {
        Self::new(special::UNSUPPORTED, FrameworkVersion::EMPTY)
    }

    /// Attach a platform version.
    pub fn with_platform_version(mut self, platform_version: FrameworkVersion) -> Self {
        self.platform_version = Some(platform_version);
        self
    }

    /// The same framework at another version.
    pub fn at_version(&self, version: FrameworkVersion) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    /// The same framework and version with another named profile.
    pub fn with_exact_profile(&self, profile: &str) -> Self {
        Self {
            profile: Profile::Exact(profile.to_string()),
            ..self.clone()
        }
    }

    /// The same version and profile under another identifier.
    pub fn renamed(&self, name: FrameworkName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    /// The identifier.
    pub fn name(&self) -> &FrameworkName {
        &self.name
    }

    /// The identifier as a string.
    pub fn identifier(&self) -> &str {
        self.name.as_str()
    }

    /// The version.
    pub fn version(&self) -> FrameworkVersion {
        self.version
    }

    /// The profile.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The platform version, if any.
    pub fn platform_version(&self) -> Option<FrameworkVersion> {
        self.platform_version
    }

    /// The resolved portable profile of a `.NETPortable` framework.
    pub fn portable_profile(&self) -> Option<&PortableProfile> {
        match &self.profile {
            Profile::Portable(p) => Some(p),
            Profile::Exact(_) => None,
        }
    }

    /// True for the `Any` wildcard.
    pub fn is_any(&self) -> bool {
        self.name.is(special::ANY)
    }

    /// True for the `Agnostic` framework.
    pub fn is_agnostic(&self) -> bool {
        self.name.is(special::AGNOSTIC)
    }

    /// True for `Unsupported`.
    pub fn is_unsupported(&self) -> bool {
        self.name.is(special::UNSUPPORTED)
    }

    /// True for every framework that is not `Any`, `Agnostic` or `Unsupported`.
    pub fn is_specific(&self) -> bool {
        !self.name.is_special()
    }

    /// True for portable class library frameworks.
    pub fn is_portable(&self) -> bool {
        matches!(self.profile, Profile::Portable(_))
    }

    /// True when the framework has any profile.
    pub fn has_profile(&self) -> bool {
        !self.profile.is_empty()
    }

    /// True for frameworks whose surface area is delivered as packages.
    pub fn is_package_based(&self) -> bool {
        [
            ids::NET_PLATFORM,
            ids::NET_STANDARD,
            ids::NET_STANDARD_APP,
            ids::NET_CORE_APP,
            ids::DNX_CORE,
        ]
        .iter()
        .any(|id| self.name.is(id))
    }

    /// True when both frameworks share identifier, profile and platform
    /// version, whatever their versions.
    pub fn same_except_version(&self, other: &Self) -> bool {
        self.name == other.name
            && self.profile == other.profile
            && self.platform_version == other.platform_version
    }

    /// The folder-name form under the default mappings, e.g. `net45-client`.
    pub fn to_short_folder_name(&self) -> String {
        crate::default_provider().short_folder_name(self)
    }

    /// The long form under the default mappings, e.g.
    /// `.NETFramework,Version=v4.5,Profile=Client`.
    pub fn to_full_name(&self) -> String {
        crate::default_provider().full_name(self)
    }
}

impl fmt::Display for FrameworkIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u32, minor: u32) -> FrameworkVersion {
        FrameworkVersion::from_major_minor(major, minor)
    }

    #[test]
    fn test_equality_ignores_case() {
        let a = FrameworkIdentity::with_profile(".NETFramework", v(4, 0), "Client");
        let b = FrameworkIdentity::with_profile(".netframework", v(4, 0), "client");
        assert_eq!(a, b);

        let c = FrameworkIdentity::new(".NETFramework", v(4, 0));
        assert_ne!(a, c);
    }

    #[test]
    fn test_special_frameworks() {
        assert!(FrameworkIdentity::any().is_any());
        assert!(!FrameworkIdentity::any().is_specific());
        assert!(FrameworkIdentity::unsupported().is_unsupported());
        assert!(FrameworkIdentity::agnostic().is_agnostic());
        assert!(FrameworkIdentity::new(ids::NATIVE, FrameworkVersion::EMPTY).is_specific());
    }

    #[test]
    fn test_portable_profile_is_canonical() {
        let net45 = FrameworkIdentity::new(ids::NET, v(4, 5));
        let win8 = FrameworkIdentity::new(ids::WINDOWS, v(8, 0));
        let android = FrameworkIdentity::new(ids::MONO_ANDROID, FrameworkVersion::EMPTY);

        let a = PortableProfile::from_list(
            vec![win8.clone(), net45.clone(), android.clone()],
            vec![android.clone()],
        );
        let b = PortableProfile::from_list(
            vec![android.clone(), net45.clone(), win8.clone(), net45.clone()],
            vec![android.clone()],
        );
        assert_eq!(a, b);
        assert_eq!(a.frameworks().len(), 3);
        assert_eq!(a.required().count(), 2);
        assert!(a.is_optional(&android));
        assert!(a.number().is_none());
    }

    #[test]
    fn test_numbered_profile() {
        let net45 = FrameworkIdentity::new(ids::NET, v(4, 5));
        let win8 = FrameworkIdentity::new(ids::WINDOWS, v(8, 0));
        let android = FrameworkIdentity::new(ids::MONO_ANDROID, FrameworkVersion::EMPTY);

        let profile = PortableProfile::numbered(7, vec![net45, win8], vec![android]);
        assert_eq!(profile.profile_name().as_deref(), Some("Profile7"));
        assert_eq!(profile.frameworks().len(), 3);
        assert_eq!(profile.required().count(), 2);

        let framework = FrameworkIdentity::portable(FrameworkVersion::EMPTY, profile);
        assert!(framework.is_portable());
        assert!(framework.has_profile());
        assert!(framework.portable_profile().is_some());
    }

    #[test]
    fn test_platform_version_takes_part_in_equality() {
        let uap = FrameworkIdentity::new(ids::UAP, v(10, 0));
        let pinned = uap.clone().with_platform_version(v(10, 1));
        assert_ne!(uap, pinned);
        assert!(!uap.same_except_version(&pinned));
        assert_eq!(pinned.platform_version(), Some(v(10, 1)));
    }

    #[test]
    fn test_ordering_by_name_then_version() {
        let mut frameworks = vec![
            FrameworkIdentity::new(ids::WINDOWS, v(8, 1)),
            FrameworkIdentity::new(ids::NET, v(4, 5)),
            FrameworkIdentity::new(ids::NET, v(4, 0)),
        ];
        frameworks.sort();
        assert_eq!(frameworks[0].version(), v(4, 0));
        assert_eq!(frameworks[1].version(), v(4, 5));
        assert_eq!(frameworks[2].identifier(), ids::WINDOWS);
    }
}
