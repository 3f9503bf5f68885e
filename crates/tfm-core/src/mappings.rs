//! Mapping tables that drive naming, equivalence and compatibility.
//!
//! The engine never hard-codes framework relationships in its algorithms.
//! Everything it knows comes from one or more [`FrameworkMappings`] sources,
//! merged by [`crate::FrameworkNameProvider`] at construction time. The
//! built-in tables live in [`DefaultFrameworkMappings`]; extra sources can be
//! layered on top (see [`crate::overrides`]).

use crate::framework::FrameworkIdentity;
use crate::range::{CompatibilityMapping, FrameworkRange};
use tfm_schema::identifier::ids;
use tfm_schema::{FrameworkName, FrameworkVersion};

/// A folder-name abbreviation for a profile of one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileShortName {
    /// Identifier the abbreviation belongs to.
    pub identifier: FrameworkName,
    /// Abbreviated form, e.g. `WP`.
    pub short: String,
    /// Full profile name, e.g. `WindowsPhone`. Empty for the full framework.
    pub profile: String,
}

/// Two profiles of one identifier that denote the same surface area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEquivalence {
    /// Identifier both profiles belong to.
    pub identifier: FrameworkName,
    /// First profile.
    pub a: String,
    /// Second profile.
    pub b: String,
}

/// A source of mapping data.
///
/// Every table defaults to empty so a source only implements what it adds.
pub trait FrameworkMappings: std::fmt::Debug + Send + Sync {
    /// Alternate spellings mapped to canonical identifiers.
    fn identifier_synonyms(&self) -> &[(String, FrameworkName)] {
        &[]
    }

    /// Canonical identifiers and their folder-name short form.
    fn identifier_short_names(&self) -> &[(FrameworkName, String)] {
        &[]
    }

    /// Profile abbreviations.
    fn profile_short_names(&self) -> &[ProfileShortName] {
        &[]
    }

    /// Two-way framework equivalences.
    fn equivalent_frameworks(&self) -> &[(FrameworkIdentity, FrameworkIdentity)] {
        &[]
    }

    /// Two-way profile equivalences.
    fn equivalent_profiles(&self) -> &[ProfileEquivalence] {
        &[]
    }

    /// `(subset, superset)` identifier pairs.
    fn subset_frameworks(&self) -> &[(FrameworkName, FrameworkName)] {
        &[]
    }

    /// One-way compatibility edges.
    fn compatibility_mappings(&self) -> &[CompatibilityMapping] {
        &[]
    }

    /// Tie-break order used by nearest-match selection.
    fn precedence(&self) -> &[FrameworkName] {
        &[]
    }

    /// Order in which equivalent frameworks are kept by equivalence reduction.
    fn equivalent_precedence(&self) -> &[FrameworkName] {
        &[]
    }

    /// Version implied by a bare identifier token with no version digits.
    fn bare_versions(&self) -> &[(FrameworkName, FrameworkVersion)] {
        &[]
    }
}

/// The built-in mapping tables.
#[derive(Debug, Clone)]
pub struct DefaultFrameworkMappings {
    synonyms: Vec<(String, FrameworkName)>,
    short_names: Vec<(FrameworkName, String)>,
    profile_short_names: Vec<ProfileShortName>,
    equivalent_frameworks: Vec<(FrameworkIdentity, FrameworkIdentity)>,
    equivalent_profiles: Vec<ProfileEquivalence>,
    subsets: Vec<(FrameworkName, FrameworkName)>,
    compatibility: Vec<CompatibilityMapping>,
    precedence: Vec<FrameworkName>,
    equivalent_precedence: Vec<FrameworkName>,
    bare_versions: Vec<(FrameworkName, FrameworkVersion)>,
}

/// Identifiers of the Xamarin and Mono platforms.
pub const XAMARIN_FAMILY: &[&str] = &[
    ids::MONO_ANDROID,
    ids::MONO_MAC,
    ids::MONO_TOUCH,
    ids::XAMARIN_IOS,
    ids::XAMARIN_MAC,
    ids::XAMARIN_PS3,
    ids::XAMARIN_PS4,
    ids::XAMARIN_PS_VITA,
    ids::XAMARIN_WATCH_OS,
    ids::XAMARIN_TV_OS,
    ids::XAMARIN_XBOX_360,
    ids::XAMARIN_XBOX_ONE,
];

fn v(major: u32, minor: u32) -> FrameworkVersion {
    FrameworkVersion::from_major_minor(major, minor)
}

fn fw(id: &str, version: FrameworkVersion) -> FrameworkIdentity {
    FrameworkIdentity::new(id, version)
}

/// Every version of `id`.
fn all(id: &str) -> FrameworkRange {
    FrameworkRange::new(
        fw(id, FrameworkVersion::EMPTY),
        fw(id, FrameworkVersion::MAX),
    )
}

/// `id` at `version` and above.
fn from(id: &str, version: FrameworkVersion) -> FrameworkRange {
    FrameworkRange::new(fw(id, version), fw(id, FrameworkVersion::MAX))
}

/// `id` from zero up to `version`.
fn upto(id: &str, version: FrameworkVersion) -> FrameworkRange {
    FrameworkRange::new(fw(id, FrameworkVersion::EMPTY), fw(id, version))
}

fn edge(project: FrameworkRange, supports: FrameworkRange) -> CompatibilityMapping {
    CompatibilityMapping::new(project, supports)
}

fn names(list: &[&str]) -> Vec<FrameworkName> {
    list.iter().map(|n| FrameworkName::new(n)).collect()
}

impl DefaultFrameworkMappings {
    /// Build the built-in tables.
    pub fn new() -> Self {
        Self {
            synonyms: Self::synonyms(),
            short_names: Self::short_names(),
            profile_short_names: Self::profile_short_names(),
            equivalent_frameworks: Self::equivalent_frameworks(),
            equivalent_profiles: Self::equivalent_profiles(),
            subsets: vec![
                (FrameworkName::new(ids::NET), FrameworkName::new(ids::DNX)),
                (
                    FrameworkName::new(ids::NET_PLATFORM),
                    FrameworkName::new(ids::DNX_CORE),
                ),
                (
                    FrameworkName::new(ids::NET_STANDARD),
                    FrameworkName::new(ids::NET_STANDARD_APP),
                ),
            ],
            compatibility: Self::compatibility(),
            precedence: names(&[
                ids::NET,
                ids::NET_CORE,
                ids::WINDOWS,
                ids::WINDOWS_PHONE_APP,
            ]),
            equivalent_precedence: names(&[
                ids::WINDOWS,
                ids::WINDOWS_PHONE,
                ids::NET_CORE,
                ids::WIN_RT,
                ids::SILVERLIGHT,
            ]),
            bare_versions: vec![
                (FrameworkName::new(ids::NET_PLATFORM), v(5, 0)),
                (FrameworkName::new(ids::DNX_CORE), v(5, 0)),
            ],
        }
    }

    fn synonyms() -> Vec<(String, FrameworkName)> {
        [
            ("NETFramework", ids::NET),
            (".NET", ids::NET),
            ("NETCore", ids::NET_CORE),
            ("NETPortable", ids::PORTABLE),
            ("NETPlatform", ids::NET_PLATFORM),
            ("NETStandard", ids::NET_STANDARD),
            ("NETCoreApp", ids::NET_CORE_APP),
            ("asp.net", ids::ASP_NET),
            ("asp.netcore", ids::ASP_NET_CORE),
            ("Xamarin.PlayStationThree", ids::XAMARIN_PS3),
            ("XamarinPlayStationThree", ids::XAMARIN_PS3),
            ("Xamarin.PlayStationFour", ids::XAMARIN_PS4),
            ("XamarinPlayStationFour", ids::XAMARIN_PS4),
            ("XamarinPlayStationVita", ids::XAMARIN_PS_VITA),
        ]
        .into_iter()
        .map(|(alias, id)| (alias.to_string(), FrameworkName::new(id)))
        .collect()
    }

    fn short_names() -> Vec<(FrameworkName, String)> {
        [
            (ids::NET_PLATFORM, "dotnet"),
            (ids::NET, "net"),
            (ids::NET_MICRO, "netmf"),
            (ids::SILVERLIGHT, "sl"),
            (ids::PORTABLE, "portable"),
            (ids::WINDOWS_PHONE, "wp"),
            (ids::WINDOWS_PHONE_APP, "wpa"),
            (ids::WINDOWS, "win"),
            (ids::ASP_NET, "aspnet"),
            (ids::ASP_NET_CORE, "aspnetcore"),
            (ids::NATIVE, "native"),
            (ids::MONO_ANDROID, "monoandroid"),
            (ids::MONO_TOUCH, "monotouch"),
            (ids::MONO_MAC, "monomac"),
            (ids::XAMARIN_IOS, "xamarinios"),
            (ids::XAMARIN_MAC, "xamarinmac"),
            (ids::XAMARIN_PS3, "xamarinpsthree"),
            (ids::XAMARIN_PS4, "xamarinpsfour"),
            (ids::XAMARIN_PS_VITA, "xamarinpsvita"),
            (ids::XAMARIN_WATCH_OS, "xamarinwatchos"),
            (ids::XAMARIN_TV_OS, "xamarintvos"),
            (ids::XAMARIN_XBOX_360, "xamarinxboxthreesixty"),
            (ids::XAMARIN_XBOX_ONE, "xamarinxboxone"),
            (ids::DNX, "dnx"),
            (ids::DNX_CORE, "dnxcore"),
            (ids::NET_CORE, "netcore"),
            (ids::WIN_RT, "winrt"),
            (ids::UAP, "uap"),
            (ids::NET_STANDARD, "netstandard"),
            (ids::NET_STANDARD_APP, "netstandardapp"),
            (ids::NET_CORE_APP, "netcoreapp"),
            (ids::CORE, "core"),
        ]
        .into_iter()
        .map(|(id, short)| (FrameworkName::new(id), short.to_string()))
        .collect()
    }

    fn profile_short_names() -> Vec<ProfileShortName> {
        [
            (ids::NET, "Client", "Client"),
            (ids::NET, "CF", "CompactFramework"),
            (ids::NET, "Full", ""),
            (ids::SILVERLIGHT, "WP", "WindowsPhone"),
            (ids::SILVERLIGHT, "WP71", "WindowsPhone71"),
        ]
        .into_iter()
        .map(|(id, short, profile)| ProfileShortName {
            identifier: FrameworkName::new(id),
            short: short.to_string(),
            profile: profile.to_string(),
        })
        .collect()
    }

    fn equivalent_profiles() -> Vec<ProfileEquivalence> {
        [
            (ids::NET, "Client", ""),
            (ids::NET, "Full", ""),
            (ids::SILVERLIGHT, "WindowsPhone71", "WindowsPhone"),
            (ids::WINDOWS_PHONE, "WindowsPhone71", "WindowsPhone"),
        ]
        .into_iter()
        .map(|(id, a, b)| ProfileEquivalence {
            identifier: FrameworkName::new(id),
            a: a.to_string(),
            b: b.to_string(),
        })
        .collect()
    }

    fn equivalent_frameworks() -> Vec<(FrameworkIdentity, FrameworkIdentity)> {
        let empty = FrameworkVersion::EMPTY;
        let sl_wp = |major, minor, profile| {
            FrameworkIdentity::with_profile(ids::SILVERLIGHT, v(major, minor), profile)
        };

        vec![
            // uap == uap10.0
            (fw(ids::UAP, empty), fw(ids::UAP, v(10, 0))),
            // win == win8 == netcore45 == winrt45
            (fw(ids::WINDOWS, empty), fw(ids::WINDOWS, v(8, 0))),
            (fw(ids::WINDOWS, v(8, 0)), fw(ids::NET_CORE, v(4, 5))),
            (fw(ids::NET_CORE, v(4, 5)), fw(ids::WIN_RT, v(4, 5))),
            (fw(ids::NET_CORE, empty), fw(ids::NET_CORE, v(4, 5))),
            (fw(ids::WIN_RT, empty), fw(ids::WIN_RT, v(4, 5))),
            // win81 == netcore451
            (fw(ids::WINDOWS, v(8, 1)), fw(ids::NET_CORE, FrameworkVersion::new(4, 5, 1, 0))),
            // wp == wp7 == sl3-wp
            (fw(ids::WINDOWS_PHONE, empty), fw(ids::WINDOWS_PHONE, v(7, 0))),
            (fw(ids::WINDOWS_PHONE, v(7, 0)), sl_wp(3, 0, "WindowsPhone")),
            (fw(ids::WINDOWS_PHONE, v(7, 1)), sl_wp(4, 0, "WindowsPhone71")),
            (fw(ids::WINDOWS_PHONE, v(8, 0)), sl_wp(8, 0, "WindowsPhone")),
            (fw(ids::WINDOWS_PHONE, v(8, 1)), sl_wp(8, 1, "WindowsPhone")),
            // wpa == wpa81
            (fw(ids::WINDOWS_PHONE_APP, empty), fw(ids::WINDOWS_PHONE_APP, v(8, 1))),
            // bare names of the 5.0 era
            (fw(ids::DNX, empty), fw(ids::DNX, v(4, 5))),
            (fw(ids::DNX_CORE, empty), fw(ids::DNX_CORE, v(5, 0))),
            (fw(ids::NET_PLATFORM, empty), fw(ids::NET_PLATFORM, v(5, 0))),
            (fw(ids::ASP_NET, empty), fw(ids::ASP_NET, v(5, 0))),
            (fw(ids::ASP_NET_CORE, empty), fw(ids::ASP_NET_CORE, v(5, 0))),
            (fw(ids::DNX, v(4, 5)), fw(ids::ASP_NET, v(5, 0))),
        ]
    }

    fn compatibility() -> Vec<CompatibilityMapping> {
        let net451 = FrameworkVersion::new(4, 5, 1, 0);
        let net461 = FrameworkVersion::new(4, 6, 1, 0);
        let net462 = FrameworkVersion::new(4, 6, 2, 0);
        let rs2 = FrameworkVersion::new(10, 0, 15064, 0);

        let mut mappings = vec![
            // UAP consumes the Windows and Windows Phone store surfaces
            edge(all(ids::UAP), upto(ids::WINDOWS, v(8, 1))),
            edge(all(ids::UAP), upto(ids::WINDOWS_PHONE_APP, v(8, 1))),
            edge(
                all(ids::UAP),
                FrameworkRange::exact(fw(ids::NET_CORE, v(5, 0))),
            ),
            edge(all(ids::WINDOWS), upto(ids::WIN_RT, v(4, 5))),
            // DNX runtimes
            edge(all(ids::DNX), FrameworkRange::exact(fw(ids::NATIVE, FrameworkVersion::EMPTY))),
            edge(all(ids::DNX_CORE), FrameworkRange::exact(fw(ids::NATIVE, FrameworkVersion::EMPTY))),
            edge(all(ids::DNX_CORE), upto(ids::CORE, v(5, 0))),
            edge(all(ids::DNX_CORE), upto(ids::ASP_NET_CORE, v(5, 0))),
            edge(from(ids::NET, net451), upto(ids::CORE, v(5, 0))),
            // dotnet generations
            edge(all(ids::DNX_CORE), upto(ids::NET_PLATFORM, v(5, 6))),
            edge(all(ids::UAP), upto(ids::NET_PLATFORM, v(5, 5))),
            edge(from(ids::NET_CORE, v(5, 0)), upto(ids::NET_PLATFORM, v(5, 5))),
            edge(
                from(ids::WINDOWS_PHONE_APP, v(8, 1)),
                upto(ids::NET_PLATFORM, v(5, 3)),
            ),
            edge(from(ids::WINDOWS_PHONE, v(8, 0)), upto(ids::NET_PLATFORM, v(5, 1))),
            edge(from(ids::NET, v(4, 5)), upto(ids::NET_PLATFORM, v(5, 2))),
            edge(from(ids::NET, net451), upto(ids::NET_PLATFORM, v(5, 3))),
            edge(from(ids::NET, v(4, 6)), upto(ids::NET_PLATFORM, v(5, 4))),
            edge(from(ids::NET, net461), upto(ids::NET_PLATFORM, v(5, 5))),
            edge(from(ids::NET, net462), upto(ids::NET_PLATFORM, v(5, 6))),
            edge(from(ids::NET_CORE, v(4, 5)), upto(ids::NET_PLATFORM, v(5, 2))),
            edge(from(ids::NET_CORE, net451), upto(ids::NET_PLATFORM, v(5, 3))),
            // netstandard generations
            edge(all(ids::DNX_CORE), upto(ids::NET_STANDARD, v(1, 5))),
            edge(all(ids::UAP), upto(ids::NET_STANDARD, v(1, 4))),
            edge(from(ids::UAP, rs2), upto(ids::NET_STANDARD, v(2, 0))),
            edge(from(ids::NET_CORE, v(5, 0)), upto(ids::NET_STANDARD, v(1, 4))),
            edge(
                from(ids::WINDOWS_PHONE_APP, v(8, 1)),
                upto(ids::NET_STANDARD, v(1, 2)),
            ),
            edge(from(ids::WINDOWS_PHONE, v(8, 0)), upto(ids::NET_STANDARD, v(1, 0))),
            edge(from(ids::NET_CORE, v(4, 5)), upto(ids::NET_STANDARD, v(1, 1))),
            edge(from(ids::NET_CORE, net451), upto(ids::NET_STANDARD, v(1, 2))),
            edge(from(ids::NET, v(4, 5)), upto(ids::NET_STANDARD, v(1, 1))),
            edge(from(ids::NET, net451), upto(ids::NET_STANDARD, v(1, 2))),
            edge(from(ids::NET, v(4, 6)), upto(ids::NET_STANDARD, v(1, 3))),
            edge(from(ids::NET, net461), upto(ids::NET_STANDARD, v(2, 0))),
            edge(from(ids::NET_CORE_APP, v(1, 0)), upto(ids::NET_STANDARD, v(1, 6))),
            edge(from(ids::NET_CORE_APP, v(1, 1)), upto(ids::NET_STANDARD, v(1, 7))),
            edge(from(ids::NET_CORE_APP, v(2, 0)), upto(ids::NET_STANDARD, v(2, 0))),
            edge(from(ids::NET_CORE_APP, v(3, 0)), upto(ids::NET_STANDARD, v(2, 1))),
        ];

        for id in XAMARIN_FAMILY {
            mappings.push(edge(all(id), upto(ids::NET_PLATFORM, v(5, 6))));
            mappings.push(edge(all(id), upto(ids::NET_STANDARD, v(2, 0))));
        }

        mappings
    }
}

impl Default for DefaultFrameworkMappings {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameworkMappings for DefaultFrameworkMappings {
    fn identifier_synonyms(&self) -> &[(String, FrameworkName)] {
        &self.synonyms
    }

    fn identifier_short_names(&self) -> &[(FrameworkName, String)] {
        &self.short_names
    }

    fn profile_short_names(&self) -> &[ProfileShortName] {
        &self.profile_short_names
    }

    fn equivalent_frameworks(&self) -> &[(FrameworkIdentity, FrameworkIdentity)] {
        &self.equivalent_frameworks
    }

    fn equivalent_profiles(&self) -> &[ProfileEquivalence] {
        &self.equivalent_profiles
    }

    fn subset_frameworks(&self) -> &[(FrameworkName, FrameworkName)] {
        &self.subsets
    }

    fn compatibility_mappings(&self) -> &[CompatibilityMapping] {
        &self.compatibility
    }

    fn precedence(&self) -> &[FrameworkName] {
        &self.precedence
    }

    fn equivalent_precedence(&self) -> &[FrameworkName] {
        &self.equivalent_precedence
    }

    fn bare_versions(&self) -> &[(FrameworkName, FrameworkVersion)] {
        &self.bare_versions
    }
}
