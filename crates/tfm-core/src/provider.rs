//! Merged, read-only lookups over the mapping tables.
//!
//! [`FrameworkNameProvider`] folds every [`FrameworkMappings`] source into
//! hash maps once, at construction. After that it is immutable and can be
//! shared freely between threads; parsing, formatting, expansion and
//! compatibility checks all borrow it.

use crate::framework::{FrameworkIdentity, PortableProfile};
use crate::mappings::{DefaultFrameworkMappings, FrameworkMappings};
use crate::portable::{DefaultPortableFrameworkMappings, PortableFrameworkMappings, PortableProfileEntry};
use crate::range::{CompatibilityMapping, FrameworkRange};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use tfm_schema::{FrameworkName, FrameworkVersion};

type ProfileKey = (FrameworkName, String);

fn profile_key(name: &FrameworkName, profile: &str) -> ProfileKey {
    (name.clone(), profile.to_ascii_lowercase())
}

/// Name, equivalence and portable-profile lookups.
#[derive(Debug, Default)]
pub struct FrameworkNameProvider {
    /// Lower-cased short names, long names and synonyms to canonical identifiers.
    identifiers: HashMap<String, FrameworkName>,
    short_identifiers: HashMap<FrameworkName, String>,
    /// `(identifier, lower-cased short)` to full profile.
    profiles: HashMap<ProfileKey, String>,
    /// `(identifier, lower-cased profile)` to short profile.
    short_profiles: HashMap<ProfileKey, String>,
    equivalent_frameworks: HashMap<FrameworkIdentity, Vec<FrameworkIdentity>>,
    equivalent_profiles: HashMap<ProfileKey, Vec<String>>,
    /// Superset identifier to the identifiers it implies.
    subsets: HashMap<FrameworkName, Vec<FrameworkName>>,
    compatibility: Vec<CompatibilityMapping>,
    precedence: Vec<FrameworkName>,
    equivalent_precedence: Vec<FrameworkName>,
    bare_versions: HashMap<FrameworkName, FrameworkVersion>,
    portable_profiles: BTreeMap<u32, PortableProfileEntry>,
    placeholders: HashSet<FrameworkName>,
}

impl FrameworkNameProvider {
    /// Merge the given sources. Later sources win where two define the same
    /// short name or profile abbreviation; list-valued tables are unioned.
    pub fn new(
        mappings: &[&dyn FrameworkMappings],
        portable: &[&dyn PortableFrameworkMappings],
    ) -> Self {
        let mut provider = Self::default();

        for source in mappings {
            provider.add_mappings(*source);
        }

        for source in portable {
            for entry in source.profiles() {
                provider
                    .placeholders
                    .extend(entry.optional.iter().map(|f| f.name().clone()));
                provider.portable_profiles.insert(entry.number, entry.clone());
            }
        }

        tracing::debug!(
            identifiers = provider.identifiers.len(),
            equivalences = provider.equivalent_frameworks.len(),
            mappings = provider.compatibility.len(),
            portable_profiles = provider.portable_profiles.len(),
            "Built framework name provider"
        );

        provider
    }

    /// A provider over the built-in tables only.
    pub fn with_defaults() -> Self {
        let mappings = DefaultFrameworkMappings::new();
        let portable = DefaultPortableFrameworkMappings::new();
        Self::new(&[&mappings], &[&portable])
    }

    fn add_mappings(&mut self, source: &dyn FrameworkMappings) {
        for (id, short) in source.identifier_short_names() {
            self.identifiers
                .insert(id.as_str().to_ascii_lowercase(), id.clone());
            self.identifiers
                .insert(short.to_ascii_lowercase(), id.clone());
            self.short_identifiers.insert(id.clone(), short.clone());
        }

        for (alias, id) in source.identifier_synonyms() {
            self.identifiers
                .insert(alias.to_ascii_lowercase(), id.clone());
            self.identifiers
                .entry(id.as_str().to_ascii_lowercase())
                .or_insert_with(|| id.clone());
        }

        for entry in source.profile_short_names() {
            self.profiles.insert(
                profile_key(&entry.identifier, &entry.short),
                entry.profile.clone(),
            );
            if !entry.profile.is_empty() {
                self.short_profiles.insert(
                    profile_key(&entry.identifier, &entry.profile),
                    entry.short.clone(),
                );
            }
        }

        for (a, b) in source.equivalent_frameworks() {
            push_unique(self.equivalent_frameworks.entry(a.clone()).or_default(), b);
            push_unique(self.equivalent_frameworks.entry(b.clone()).or_default(), a);
        }

        for entry in source.equivalent_profiles() {
            push_unique(
                self.equivalent_profiles
                    .entry(profile_key(&entry.identifier, &entry.a))
                    .or_default(),
                &entry.b,
            );
            push_unique(
                self.equivalent_profiles
                    .entry(profile_key(&entry.identifier, &entry.b))
                    .or_default(),
                &entry.a,
            );
        }

        for (subset, superset) in source.subset_frameworks() {
            push_unique(self.subsets.entry(superset.clone()).or_default(), subset);
        }

        for mapping in source.compatibility_mappings() {
            push_unique(&mut self.compatibility, mapping);
        }

        for name in source.precedence() {
            push_unique(&mut self.precedence, name);
        }

        for name in source.equivalent_precedence() {
            push_unique(&mut self.equivalent_precedence, name);
        }

        for (name, version) in source.bare_versions() {
            self.bare_versions.insert(name.clone(), *version);
        }
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    /// Resolve a short name, long name or synonym to its canonical identifier.
    pub fn identifier(&self, name: &str) -> Option<FrameworkName> {
        self.identifiers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// The folder-name short form of an identifier.
    pub fn short_identifier(&self, name: &FrameworkName) -> Option<&str> {
        self.short_identifiers.get(name).map(String::as_str)
    }

    /// Expand a profile abbreviation (`WP`, `Client`, `Full`).
    pub fn profile(&self, name: &FrameworkName, short: &str) -> Option<&str> {
        self.profiles
            .get(&profile_key(name, short))
            .map(String::as_str)
    }

    /// The abbreviation of a full profile name.
    pub fn short_profile(&self, name: &FrameworkName, profile: &str) -> Option<&str> {
        self.short_profiles
            .get(&profile_key(name, profile))
            .map(String::as_str)
    }

    /// Version implied by a bare identifier, e.g. `dotnet` meaning 5.0.
    pub fn bare_version(&self, name: &FrameworkName) -> Option<FrameworkVersion> {
        self.bare_versions.get(name).copied()
    }

    /// True for identifiers that appear as optional portable placeholders.
    pub fn is_placeholder(&self, name: &FrameworkName) -> bool {
        self.placeholders.contains(name)
    }

    // ------------------------------------------------------------------
    // Equivalence
    // ------------------------------------------------------------------

    /// Profile aliases in canonical form: `Full` comes back as the empty
    /// profile, so an alias never differs from `framework` by spelling only.
    fn profile_aliases(&self, framework: &FrameworkIdentity) -> Vec<FrameworkIdentity> {
        let Some(profile) = framework.profile().as_exact() else {
            return Vec::new();
        };
        let name = framework.name();
        let mut result: Vec<FrameworkIdentity> = Vec::new();
        for alias in self
            .equivalent_profiles
            .get(&profile_key(name, profile))
            .into_iter()
            .flatten()
        {
            let alias = framework.with_exact_profile(self.profile(name, alias).unwrap_or(alias));
            if alias != *framework && !result.contains(&alias) {
                result.push(alias);
            }
        }
        result
    }

    /// Frameworks directly equivalent to `framework`, including profile
    /// aliases of it and of each equivalent. Never contains `framework`.
    pub fn equivalent_frameworks(&self, framework: &FrameworkIdentity) -> Vec<FrameworkIdentity> {
        let mut result = Vec::new();
        let mut push = |candidate: FrameworkIdentity| {
            if candidate != *framework && !result.contains(&candidate) {
                result.push(candidate);
            }
        };

        let mut bases = vec![framework.clone()];
        bases.extend(self.profile_aliases(framework));

        for base in &bases {
            push(base.clone());
            if let Some(equivalents) = self.equivalent_frameworks.get(base) {
                for equivalent in equivalents {
                    push(equivalent.clone());
                    for alias in self.profile_aliases(equivalent) {
                        push(alias);
                    }
                }
            }
        }

        result
    }

    /// Equivalents of every equivalence key that falls within `range`.
    pub fn equivalent_frameworks_in_range(&self, range: &FrameworkRange) -> Vec<FrameworkIdentity> {
        let mut keys: Vec<&FrameworkIdentity> = self
            .equivalent_frameworks
            .keys()
            .filter(|key| range.satisfies(key))
            .collect();
        keys.sort();

        let mut result = Vec::new();
        for key in keys {
            for equivalent in self.equivalent_frameworks(key) {
                push_unique(&mut result, &equivalent);
            }
        }
        result
    }

    /// The full equivalence class of `framework`, minus `framework` itself.
    pub fn equivalent_closure(&self, framework: &FrameworkIdentity) -> Vec<FrameworkIdentity> {
        let mut seen: HashSet<FrameworkIdentity> = HashSet::from([framework.clone()]);
        let mut result = Vec::new();
        let mut queue = VecDeque::from([framework.clone()]);

        while let Some(current) = queue.pop_front() {
            for next in self.equivalent_frameworks(&current) {
                if seen.insert(next.clone()) {
                    result.push(next.clone());
                    queue.push_back(next);
                }
            }
        }

        result
    }

    /// True when `a` and `b` are equal or in the same equivalence class.
    pub fn are_equivalent(&self, a: &FrameworkIdentity, b: &FrameworkIdentity) -> bool {
        a == b || self.equivalent_closure(a).contains(b)
    }

    /// Drop frameworks equivalent to one listed earlier.
    pub fn remove_duplicate_frameworks(&self, frameworks: &[FrameworkIdentity]) -> Vec<FrameworkIdentity> {
        let mut seen: HashSet<FrameworkIdentity> = HashSet::new();
        let mut result = Vec::new();

        for framework in frameworks {
            if seen.contains(framework) {
                continue;
            }
            seen.insert(framework.clone());
            seen.extend(self.equivalent_closure(framework));
            result.push(framework.clone());
        }

        result
    }

    // ------------------------------------------------------------------
    // Compatibility edges
    // ------------------------------------------------------------------

    /// Package ranges `framework` may consume through one-way mappings.
    pub fn compatibility_mappings<'a>(
        &'a self,
        framework: &'a FrameworkIdentity,
    ) -> impl Iterator<Item = &'a FrameworkRange> + 'a {
        self.compatibility
            .iter()
            .filter(move |m| m.project.satisfies(framework))
            .map(|m| &m.supports)
    }

    /// Identifiers implied by `superset` at the same version and profile.
    pub fn subset_frameworks(&self, superset: &FrameworkName) -> &[FrameworkName] {
        self.subsets.get(superset).map_or(&[][..], Vec::as_slice)
    }

    // ------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------

    /// Order by the nearest-match precedence list; unlisted identifiers last.
    pub fn compare_precedence(&self, a: &FrameworkIdentity, b: &FrameworkIdentity) -> Ordering {
        rank(&self.precedence, a).cmp(&rank(&self.precedence, b))
    }

    /// Order by the equivalence-reduction precedence list; unlisted last.
    pub fn compare_equivalent_precedence(
        &self,
        a: &FrameworkIdentity,
        b: &FrameworkIdentity,
    ) -> Ordering {
        rank(&self.equivalent_precedence, a).cmp(&rank(&self.equivalent_precedence, b))
    }

    // ------------------------------------------------------------------
    // Portable profiles
    // ------------------------------------------------------------------

    /// A numbered profile from the table.
    pub fn portable_profile_entry(&self, number: u32) -> Option<&PortableProfileEntry> {
        self.portable_profiles.get(&number)
    }

    /// The component frameworks of a numbered profile.
    pub fn portable_frameworks(&self, number: u32, include_optional: bool) -> Option<Vec<FrameworkIdentity>> {
        self.portable_profiles.get(&number).map(|entry| {
            let mut frameworks = entry.required.clone();
            if include_optional {
                frameworks.extend(entry.optional.iter().cloned());
            }
            frameworks
        })
    }

    /// A resolved numbered profile.
    pub fn numbered_portable_profile(&self, number: u32) -> Option<PortableProfile> {
        self.portable_profiles.get(&number).map(|entry| {
            PortableProfile::numbered(number, entry.required.clone(), entry.optional.clone())
        })
    }

    /// Find the numbered profile whose frameworks match `frameworks`.
    ///
    /// Inputs are first collapsed by equivalence. Entries that match one of
    /// a profile's optional placeholders at or above its version are ignored
    /// for that profile; the remainder must match the required set exactly,
    /// where each required framework may be replaced by an equivalent.
    pub fn portable_profile_number(&self, frameworks: &[FrameworkIdentity]) -> Option<u32> {
        let input = self.remove_duplicate_frameworks(frameworks);

        for (number, entry) in &self.portable_profiles {
            if entry.required.len() > input.len() {
                continue;
            }

            let reduced: Vec<&FrameworkIdentity> = input
                .iter()
                .filter(|f| {
                    !entry
                        .optional
                        .iter()
                        .any(|o| o.same_except_version(f) && f.version() >= o.version())
                })
                .collect();

            if reduced.len() != entry.required.len() {
                continue;
            }

            let matches = entry.required.iter().all(|required| {
                reduced
                    .iter()
                    .any(|f| self.are_equivalent(required, f))
            });

            if matches {
                return Some(*number);
            }
        }

        None
    }

    /// Resolve a list of component frameworks into a portable profile.
    ///
    /// A list matching a numbered profile becomes that profile. Any other
    /// list is kept as written, with placeholder-family members marked
    /// optional unless that would leave nothing required.
    pub fn portable_profile_for(&self, frameworks: &[FrameworkIdentity]) -> PortableProfile {
        if let Some(profile) = self
            .portable_profile_number(frameworks)
            .and_then(|n| self.numbered_portable_profile(n))
        {
            return profile;
        }

        let frameworks = self.remove_duplicate_frameworks(frameworks);
        let mut optional: Vec<FrameworkIdentity> = frameworks
            .iter()
            .filter(|f| self.is_placeholder(f.name()))
            .cloned()
            .collect();
        if optional.len() == frameworks.len() {
            optional.clear();
        }

        PortableProfile::from_list(frameworks, optional)
    }
}

fn rank(list: &[FrameworkName], framework: &FrameworkIdentity) -> usize {
    list.iter()
        .position(|name| name == framework.name())
        .unwrap_or(list.len())
}

fn push_unique<T: PartialEq + Clone>(list: &mut Vec<T>, item: &T) {
    if !list.contains(item) {
        list.push(item.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfm_schema::identifier::ids;

    fn fw(id: &str, major: u32, minor: u32) -> FrameworkIdentity {
        FrameworkIdentity::new(id, FrameworkVersion::from_major_minor(major, minor))
    }

    #[test]
    fn test_identifier_lookup() {
        let provider = FrameworkNameProvider::with_defaults();
        assert_eq!(provider.identifier("net").unwrap(), ids::NET);
        assert_eq!(provider.identifier("NET").unwrap(), ids::NET);
        assert_eq!(provider.identifier(".netframework").unwrap(), ids::NET);
        assert_eq!(provider.identifier("NETFramework").unwrap(), ids::NET);
        assert_eq!(provider.identifier("asp.net").unwrap(), ids::ASP_NET);
        assert_eq!(provider.identifier("XamarinPlayStationVita").unwrap(), ids::XAMARIN_PS_VITA);
        assert!(provider.identifier("nfcore").is_none());
        assert_eq!(
            provider.short_identifier(&FrameworkName::new(ids::WINDOWS_PHONE_APP)),
            Some("wpa")
        );
    }

    #[test]
    fn test_profile_lookup() {
        let provider = FrameworkNameProvider::with_defaults();
        let net = FrameworkName::new(ids::NET);
        let sl = FrameworkName::new(ids::SILVERLIGHT);
        assert_eq!(provider.profile(&net, "client"), Some("Client"));
        assert_eq!(provider.profile(&net, "cf"), Some("CompactFramework"));
        assert_eq!(provider.profile(&net, "full"), Some(""));
        assert_eq!(provider.profile(&sl, "wp"), Some("WindowsPhone"));
        assert_eq!(provider.short_profile(&sl, "windowsphone71"), Some("WP71"));
        assert_eq!(provider.short_profile(&net, ""), None);
    }

    #[test]
    fn test_equivalents_include_profile_aliases() {
        let provider = FrameworkNameProvider::with_defaults();
        let net40 = fw(ids::NET, 4, 0);
        let equivalents = provider.equivalent_frameworks(&net40);
        assert!(equivalents.contains(&net40.with_exact_profile("Client")));
        assert!(equivalents.contains(&net40.with_exact_profile("Full")));
        assert!(!equivalents.contains(&net40));
    }

    #[test]
    fn test_equivalent_closure_is_transitive() {
        let provider = FrameworkNameProvider::with_defaults();
        let win = FrameworkIdentity::new(ids::WINDOWS, FrameworkVersion::EMPTY);
        let closure = provider.equivalent_closure(&win);
        assert!(closure.contains(&fw(ids::WINDOWS, 8, 0)));
        assert!(closure.contains(&fw(ids::NET_CORE, 4, 5)));
        assert!(closure.contains(&fw(ids::WIN_RT, 4, 5)));
        assert!(!closure.contains(&fw(ids::WINDOWS, 8, 1)));
    }

    #[test]
    fn test_range_equivalents() {
        let provider = FrameworkNameProvider::with_defaults();
        let wp71 = fw(ids::WINDOWS_PHONE, 7, 1);
        let range = FrameworkRange::new(wp71.at_version(FrameworkVersion::EMPTY), wp71.clone());
        let found = provider.equivalent_frameworks_in_range(&range);
        assert!(found.contains(&FrameworkIdentity::with_profile(
            ids::SILVERLIGHT,
            FrameworkVersion::from_major_minor(3, 0),
            "WindowsPhone"
        )));
        assert!(!found.iter().any(|f| f.version() == FrameworkVersion::from_major_minor(8, 0)));
    }

    #[test]
    fn test_precedence_ranks_unlisted_last() {
        let provider = FrameworkNameProvider::with_defaults();
        let net = fw(ids::NET, 4, 5);
        let win = fw(ids::WINDOWS, 8, 0);
        let sl = fw(ids::SILVERLIGHT, 5, 0);
        assert_eq!(provider.compare_precedence(&net, &win), Ordering::Less);
        assert_eq!(provider.compare_precedence(&sl, &win), Ordering::Greater);
        assert_eq!(provider.compare_precedence(&sl, &sl), Ordering::Equal);
    }

    #[test]
    fn test_portable_profile_number() {
        let provider = FrameworkNameProvider::with_defaults();
        let net45 = fw(ids::NET, 4, 5);
        let win8 = fw(ids::WINDOWS, 8, 0);
        let netcore45 = fw(ids::NET_CORE, 4, 5);
        let android = fw(ids::MONO_ANDROID, 1, 0);

        assert_eq!(provider.portable_profile_number(&[net45.clone(), win8.clone()]), Some(7));
        // equivalent spelling of win8
        assert_eq!(provider.portable_profile_number(&[net45.clone(), netcore45.clone()]), Some(7));
        // duplicates by equivalence collapse
        assert_eq!(
            provider.portable_profile_number(&[net45.clone(), win8.clone(), netcore45]),
            Some(7)
        );
        // optional placeholders are ignored
        assert_eq!(provider.portable_profile_number(&[net45.clone(), win8, android]), Some(7));
        assert_eq!(provider.portable_profile_number(&[net45]), None);
    }

    #[test]
    fn test_ad_hoc_portable_profile() {
        let provider = FrameworkNameProvider::with_defaults();
        let net45 = fw(ids::NET, 4, 5);
        let dotnet = fw(ids::NET_PLATFORM, 5, 0);
        let android = FrameworkIdentity::new(ids::MONO_ANDROID, FrameworkVersion::EMPTY);

        let profile = provider.portable_profile_for(&[net45.clone(), dotnet, android.clone()]);
        assert!(profile.number().is_none());
        assert_eq!(profile.frameworks().len(), 3);
        assert_eq!(profile.optional(), &[android.clone()]);

        let only_placeholders = provider.portable_profile_for(&[android]);
        assert!(only_placeholders.optional().is_empty());
        assert_eq!(only_placeholders.required().count(), 1);

        let numbered = provider.portable_profile_for(&[net45, fw(ids::WINDOWS, 8, 0)]);
        assert_eq!(numbered.number(), Some(7));
    }
}
