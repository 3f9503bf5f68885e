//! Framework identifier names.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical long identifiers of the frameworks the engine knows about.
pub mod ids {
    /// Classic desktop .NET (`net`).
    pub const NET: &str = ".NETFramework";
    /// Windows Store class libraries (`netcore`).
    pub const NET_CORE: &str = ".NETCore";
    /// Portable class libraries (`portable`).
    pub const PORTABLE: &str = ".NETPortable";
    /// The `dotnet` generation.
    pub const NET_PLATFORM: &str = ".NETPlatform";
    /// The `netstandard` generation.
    pub const NET_STANDARD: &str = ".NETStandard";
    /// Applications built on `netstandard`.
    pub const NET_STANDARD_APP: &str = ".NETStandardApp";
    /// .NET Core applications.
    pub const NET_CORE_APP: &str = ".NETCoreApp";
    /// .NET Micro Framework (`netmf`).
    pub const NET_MICRO: &str = ".NETMicroFramework";
    /// Windows Runtime (`winrt`), legacy.
    pub const WIN_RT: &str = "WinRT";
    /// Windows Phone Silverlight (`wp`).
    pub const WINDOWS_PHONE: &str = "WindowsPhone";
    /// Windows Store apps (`win`).
    pub const WINDOWS: &str = "Windows";
    /// Windows Phone Store apps (`wpa`).
    pub const WINDOWS_PHONE_APP: &str = "WindowsPhoneApp";
    /// Silverlight (`sl`).
    pub const SILVERLIGHT: &str = "Silverlight";
    /// Universal Windows Platform (`uap`).
    pub const UAP: &str = "UAP";
    /// Native (C++) packages.
    pub const NATIVE: &str = "native";
    /// The full-framework DNX runtime.
    pub const DNX: &str = "DNX";
    /// The Core CLR DNX runtime.
    pub const DNX_CORE: &str = "DNXCore";
    /// ASP.NET on the full framework.
    pub const ASP_NET: &str = "ASP.NET";
    /// ASP.NET on the Core CLR.
    pub const ASP_NET_CORE: &str = "ASP.NETCore";
    /// Bridge identifier for libraries built against the Core CLR surface.
    pub const CORE: &str = "Core";
    /// Xamarin.Android.
    pub const MONO_ANDROID: &str = "MonoAndroid";
    /// Classic Xamarin iOS.
    pub const MONO_TOUCH: &str = "MonoTouch";
    /// Classic Xamarin Mac.
    pub const MONO_MAC: &str = "MonoMac";
    /// Unified Xamarin.iOS.
    pub const XAMARIN_IOS: &str = "Xamarin.iOS";
    /// Unified Xamarin.Mac.
    pub const XAMARIN_MAC: &str = "Xamarin.Mac";
    /// Xamarin on PlayStation 3.
    pub const XAMARIN_PS3: &str = "Xamarin.PlayStation3";
    /// Xamarin on PlayStation 4.
    pub const XAMARIN_PS4: &str = "Xamarin.PlayStation4";
    /// Xamarin on PlayStation Vita.
    pub const XAMARIN_PS_VITA: &str = "Xamarin.PlayStationVita";
    /// Xamarin on watchOS.
    pub const XAMARIN_WATCH_OS: &str = "Xamarin.WatchOS";
    /// Xamarin on tvOS.
    pub const XAMARIN_TV_OS: &str = "Xamarin.TVOS";
    /// Xamarin on Xbox 360.
    pub const XAMARIN_XBOX_360: &str = "Xamarin.Xbox360";
    /// Xamarin on Xbox One.
    pub const XAMARIN_XBOX_ONE: &str = "Xamarin.XboxOne";
}

/// Identifiers that do not name a real platform.
pub mod special {
    /// Matches every framework.
    pub const ANY: &str = "Any";
    /// Content that does not depend on a framework.
    pub const AGNOSTIC: &str = "Agnostic";
    /// An unknown or invalid framework.
    pub const UNSUPPORTED: &str = "Unsupported";
}

/// A framework identifier such as `.NETFramework` or `MonoAndroid`.
///
/// Identifiers keep the casing they were created with for display, but
/// compare, hash and order case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkName(String);

impl FrameworkName {
    /// Wrap an identifier string.
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    /// The identifier as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a plain string.
    pub fn is(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }

    /// True for `Any`, `Agnostic` and `Unsupported`.
    pub fn is_special(&self) -> bool {
        self.is(special::ANY) || self.is(special::AGNOSTIC) || self.is(special::UNSUPPORTED)
    }

    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl PartialEq for FrameworkName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for FrameworkName {}

impl PartialEq<str> for FrameworkName {
    fn eq(&self, other: &str) -> bool {
        self.is(other)
    }
}

impl PartialEq<&str> for FrameworkName {
    fn eq(&self, other: &&str) -> bool {
        self.is(other)
    }
}

impl Hash for FrameworkName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.folded() {
            state.write_u8(b);
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for FrameworkName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrameworkName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

impl fmt::Display for FrameworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for FrameworkName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameworkName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FrameworkName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_case_insensitive_identity() {
        let a = FrameworkName::new(".NETFramework");
        let b = FrameworkName::new(".netframework");
        assert_eq!(a, b);
        assert_eq!(a, ".NETFRAMEWORK");
        assert_eq!(a.as_str(), ".NETFramework");

        let set: HashSet<FrameworkName> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering_ignores_case() {
        let mut names = vec![
            FrameworkName::new("WindowsPhone"),
            FrameworkName::new(".NETFramework"),
            FrameworkName::new("windows"),
        ];
        names.sort();
        let sorted: Vec<&str> = names.iter().map(FrameworkName::as_str).collect();
        assert_eq!(sorted, vec![".NETFramework", "windows", "WindowsPhone"]);
    }

    #[test]
    fn test_special_names() {
        assert!(FrameworkName::new("any").is_special());
        assert!(FrameworkName::new("UNSUPPORTED").is_special());
        assert!(!FrameworkName::new(ids::NATIVE).is_special());
    }
}
