//! The numbered portable class library profile table.

use crate::framework::FrameworkIdentity;
use tfm_schema::FrameworkVersion;
use tfm_schema::identifier::ids;

/// One numbered portable profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortableProfileEntry {
    /// Profile number, e.g. `7` for `Profile7`.
    pub number: u32,
    /// Frameworks a consumer must match.
    pub required: Vec<FrameworkIdentity>,
    /// Placeholder frameworks that may be listed but never need matching.
    pub optional: Vec<FrameworkIdentity>,
}

/// A source of numbered portable profiles.
pub trait PortableFrameworkMappings: std::fmt::Debug + Send + Sync {
    /// Every profile this source defines.
    fn profiles(&self) -> &[PortableProfileEntry];
}

/// The built-in portable profile table.
#[derive(Debug, Clone)]
pub struct DefaultPortableFrameworkMappings {
    profiles: Vec<PortableProfileEntry>,
}

/// Profiles that list the Xamarin placeholders as optional members.
const PROFILES_WITH_OPTIONAL: &[u32] = &[
    5, 6, 7, 14, 19, 24, 37, 42, 44, 47, 49, 78, 92, 102, 111, 136, 147, 151, 158, 225, 255, 259,
    328, 336, 344,
];

/// Placeholder identifiers, listed at version zero.
const OPTIONAL_PLACEHOLDERS: &[&str] = &[
    ids::MONO_ANDROID,
    ids::MONO_TOUCH,
    ids::XAMARIN_IOS,
    ids::XAMARIN_MAC,
    ids::XAMARIN_PS3,
    ids::XAMARIN_PS4,
    ids::XAMARIN_PS_VITA,
    ids::XAMARIN_XBOX_360,
    ids::XAMARIN_XBOX_ONE,
];

fn net(major: u32, minor: u32, build: u32) -> FrameworkIdentity {
    FrameworkIdentity::new(ids::NET, FrameworkVersion::new(major, minor, build, 0))
}

fn member(id: &str, major: u32, minor: u32) -> FrameworkIdentity {
    FrameworkIdentity::new(id, FrameworkVersion::from_major_minor(major, minor))
}

impl DefaultPortableFrameworkMappings {
    /// Build the table.
    pub fn new() -> Self {
        let net4 = net(4, 0, 0);
        let net403 = net(4, 0, 3);
        let net45 = net(4, 5, 0);
        let net451 = net(4, 5, 1);
        let sl4 = member(ids::SILVERLIGHT, 4, 0);
        let sl5 = member(ids::SILVERLIGHT, 5, 0);
        let win8 = member(ids::WINDOWS, 8, 0);
        let win81 = member(ids::WINDOWS, 8, 1);
        let wp7 = member(ids::WINDOWS_PHONE, 7, 0);
        let wp75 = member(ids::WINDOWS_PHONE, 7, 5);
        let wp8 = member(ids::WINDOWS_PHONE, 8, 0);
        let wp81 = member(ids::WINDOWS_PHONE, 8, 1);
        let wpa81 = member(ids::WINDOWS_PHONE_APP, 8, 1);

        let table: Vec<(u32, Vec<&FrameworkIdentity>)> = vec![
            (2, vec![&net4, &win8, &sl4, &wp7]),
            (3, vec![&net4, &sl4]),
            (4, vec![&net45, &sl4, &win8, &wp7]),
            (5, vec![&net4, &win8]),
            (6, vec![&net403, &win8]),
            (7, vec![&net45, &win8]),
            (14, vec![&net4, &sl5]),
            (18, vec![&net403, &sl4]),
            (19, vec![&net403, &sl5]),
            (23, vec![&net45, &sl4]),
            (24, vec![&net45, &sl5]),
            (31, vec![&win81, &wp81]),
            (32, vec![&win81, &wpa81]),
            (36, vec![&net4, &sl4, &win8, &wp8]),
            (37, vec![&net4, &sl5, &win8]),
            (41, vec![&net403, &sl4, &win8]),
            (42, vec![&net403, &sl5, &win8]),
            (44, vec![&net451, &win81]),
            (46, vec![&net45, &sl4, &win8]),
            (47, vec![&net45, &sl5, &win8]),
            (49, vec![&net45, &wp8]),
            (78, vec![&net45, &win8, &wp8]),
            (84, vec![&wp81, &wpa81]),
            (88, vec![&net4, &sl4, &win8, &wp75]),
            (92, vec![&net4, &win8, &wpa81]),
            (95, vec![&net403, &sl4, &win8, &wp7]),
            (96, vec![&net403, &sl4, &win8, &wp75]),
            (102, vec![&net403, &win8, &wpa81]),
            (104, vec![&net45, &sl4, &win8, &wp75]),
            (111, vec![&net45, &win8, &wpa81]),
            (136, vec![&net4, &sl5, &win8, &wp8]),
            (143, vec![&net403, &sl4, &win8, &wp8]),
            (147, vec![&net403, &sl5, &win8, &wp8]),
            (151, vec![&net451, &win81, &wpa81]),
            (154, vec![&net45, &sl4, &win8, &wp8]),
            (157, vec![&win81, &wp81, &wpa81]),
            (158, vec![&net45, &sl5, &win8, &wp8]),
            (225, vec![&net4, &sl5, &win8, &wpa81]),
            (240, vec![&net403, &sl5, &win8, &wpa81]),
            (255, vec![&net45, &sl5, &win8, &wpa81]),
            (259, vec![&net45, &win8, &wpa81, &wp8]),
            (328, vec![&net4, &sl5, &win8, &wpa81, &wp8]),
            (336, vec![&net403, &sl5, &win8, &wpa81, &wp8]),
            (344, vec![&net45, &sl5, &win8, &wpa81, &wp8]),
        ];

        let placeholders: Vec<FrameworkIdentity> = OPTIONAL_PLACEHOLDERS
            .iter()
            .map(|id| FrameworkIdentity::new(*id, FrameworkVersion::EMPTY))
            .collect();

        let profiles = table
            .into_iter()
            .map(|(number, required)| PortableProfileEntry {
                number,
                required: required.into_iter().cloned().collect(),
                optional: if PROFILES_WITH_OPTIONAL.contains(&number) {
                    placeholders.clone()
                } else {
                    Vec::new()
                },
            })
            .collect();

        Self { profiles }
    }
}

impl Default for DefaultPortableFrameworkMappings {
    fn default() -> Self {
        Self::new()
    }
}

impl PortableFrameworkMappings for DefaultPortableFrameworkMappings {
    fn profiles(&self) -> &[PortableProfileEntry] {
        &self.profiles
    }
}
