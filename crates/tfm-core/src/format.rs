//! Rendering identities back to folder names and long names.

use crate::framework::{FrameworkIdentity, Profile};
use crate::provider::FrameworkNameProvider;
use tfm_schema::identifier::ids;

/// Identifiers whose versions keep a single part (`win8`, `sl5`, `wp7`).
const SINGLE_PART: &[&str] = &[ids::WINDOWS, ids::WINDOWS_PHONE, ids::SILVERLIGHT];

/// Identifiers whose versions are always written with dots (`netstandard1.3`).
const DOTTED: &[&str] = &[
    ids::NET_PLATFORM,
    ids::NET_STANDARD,
    ids::NET_STANDARD_APP,
    ids::NET_CORE_APP,
];

impl FrameworkNameProvider {
    /// The version as written in a folder name.
    ///
    /// A version equal to the identifier's bare version is omitted (`dotnet`
    /// rather than `dotnet5.0`); conversely an empty version on such an
    /// identifier is written out as `0.0` so it does not read back as the
    /// bare version.
    pub fn version_string(&self, framework: &FrameworkIdentity) -> String {
        let name = framework.name();
        let version = framework.version();

        if let Some(bare) = self.bare_version(name) {
            if version == bare {
                return String::new();
            }
            if version.is_empty() {
                return "0.0".to_string();
            }
        }

        let min_parts = if SINGLE_PART.iter().any(|id| name.is(id)) {
            1
        } else {
            2
        };
        let dotted = DOTTED.iter().any(|id| name.is(id));

        version.to_shorthand(min_parts, dotted)
    }

    /// The lower-case folder-name form, e.g. `net40-client` or
    /// `portable-net45+win8`.
    ///
    /// Portable frameworks from the numbered table list only their required
    /// members; explicit lists are written in full. Members are sorted.
    /// Identifiers the tables know nothing about keep their long form.
    pub fn short_folder_name(&self, framework: &FrameworkIdentity) -> String {
        if !framework.is_specific() {
            return framework.identifier().to_ascii_lowercase();
        }

        let name = framework.name();
        let short = match self.short_identifier(name) {
            Some(short) => short,
            None if self.identifier(name.as_str()).as_ref() == Some(name) => name.as_str(),
            // A folder name would read back as unsupported.
            None => return self.full_name(framework),
        };
        let mut out = short.to_string();
        out.push_str(&self.version_string(framework));

        match framework.profile() {
            Profile::Portable(portable) => {
                let members: Vec<&FrameworkIdentity> = if portable.number().is_some() {
                    portable.required().collect()
                } else {
                    portable.frameworks().iter().collect()
                };
                let mut parts: Vec<String> =
                    members.into_iter().map(|f| self.short_folder_name(f)).collect();
                parts.sort();
                out.push('-');
                out.push_str(&parts.join("+"));
            }
            Profile::Exact(profile) if !profile.is_empty() => {
                out.push('-');
                out.push_str(self.short_profile(name, profile).unwrap_or(profile));
            }
            Profile::Exact(_) => {}
        }

        out.to_ascii_lowercase()
    }

    /// The long form, e.g. `.NETFramework,Version=v4.0,Profile=Client`.
    pub fn full_name(&self, framework: &FrameworkIdentity) -> String {
        if !framework.is_specific() {
            return framework.identifier().to_string();
        }

        let mut out = format!("{},Version=v{}", framework.name(), framework.version());

        match framework.profile() {
            Profile::Portable(portable) => {
                let profile = portable.profile_name().unwrap_or_else(|| {
                    let mut parts: Vec<String> = portable
                        .frameworks()
                        .iter()
                        .map(|f| self.short_folder_name(f))
                        .collect();
                    parts.sort();
                    parts.join("+")
                });
                out.push_str(",Profile=");
                out.push_str(&profile);
            }
            Profile::Exact(profile) if !profile.is_empty() => {
                out.push_str(",Profile=");
                out.push_str(profile);
            }
            Profile::Exact(_) => {}
        }

        out
    }
}
