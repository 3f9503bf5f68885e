//! Mapping overrides loaded from a TOML file.
//!
//! [`MappingOverrides`] is plain strings. Turning it into a mapping source
//! takes two passes: the identifier names are registered first so that the
//! framework tokens in the relationship tables (`tizen3`) can be parsed
//! against them.

use crate::framework::FrameworkIdentity;
use crate::mappings::{DefaultFrameworkMappings, FrameworkMappings};
use crate::portable::DefaultPortableFrameworkMappings;
use crate::provider::FrameworkNameProvider;
use crate::range::{CompatibilityMapping, FrameworkRange};
use tfm_schema::{ConfigError, FrameworkName, FrameworkVersion, MappingOverrides};

/// A [`FrameworkMappings`] source built from user overrides.
#[derive(Debug, Clone, Default)]
pub struct OverrideMappings {
    synonyms: Vec<(String, FrameworkName)>,
    short_names: Vec<(FrameworkName, String)>,
    equivalent_frameworks: Vec<(FrameworkIdentity, FrameworkIdentity)>,
    subsets: Vec<(FrameworkName, FrameworkName)>,
    compatibility: Vec<CompatibilityMapping>,
    precedence: Vec<FrameworkName>,
}

impl OverrideMappings {
    /// Resolve every entry of `overrides` against the built-in tables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a framework token that does not
    /// parse, names an unknown identifier, or a compatibility range whose
    /// bounds belong to different frameworks.
    pub fn from_overrides(overrides: &MappingOverrides) -> Result<Self, ConfigError> {
        overrides.validate()?;

        let defaults = DefaultFrameworkMappings::new();
        let portable = DefaultPortableFrameworkMappings::new();

        let mut mappings = Self {
            short_names: overrides
                .short_names
                .iter()
                .map(|(id, short)| (FrameworkName::new(id.trim()), short.trim().to_string()))
                .collect(),
            ..Self::default()
        };

        // synonyms may point at a short name registered just above
        let names = FrameworkNameProvider::new(&[&defaults, &mappings], &[&portable]);
        mappings.synonyms = overrides
            .synonyms
            .iter()
            .map(|(alias, id)| (alias.trim().to_string(), resolve_identifier(&names, id)))
            .collect();
        mappings.precedence = overrides
            .precedence
            .iter()
            .map(|id| resolve_identifier(&names, id))
            .collect();

        let names = FrameworkNameProvider::new(&[&defaults, &mappings], &[&portable]);

        for (index, pair) in overrides.equivalent.iter().enumerate() {
            let a = parse_framework(&names, "equivalent", index, &pair.a)?;
            let b = parse_framework(&names, "equivalent", index, &pair.b)?;
            mappings.equivalent_frameworks.push((a, b));
        }

        for (index, rule) in overrides.subsets.iter().enumerate() {
            let subset = known_identifier(&names, "subsets", index, &rule.subset)?;
            let superset = known_identifier(&names, "subsets", index, &rule.superset)?;
            mappings.subsets.push((subset, superset));
        }

        for (index, rule) in overrides.compatibility.iter().enumerate() {
            let project_min = parse_framework(&names, "compatibility", index, &rule.project)?;
            let project_max = match &rule.project_max {
                Some(token) => parse_framework(&names, "compatibility", index, token)?,
                None => project_min.at_version(FrameworkVersion::MAX),
            };
            let supports_max = parse_framework(&names, "compatibility", index, &rule.supports)?;
            let supports_min = match &rule.supports_min {
                Some(token) => parse_framework(&names, "compatibility", index, token)?,
                None => supports_max.at_version(FrameworkVersion::EMPTY),
            };

            let project = range("compatibility", index, project_min, project_max)?;
            let supports = range("compatibility", index, supports_min, supports_max)?;
            mappings
                .compatibility
                .push(CompatibilityMapping::new(project, supports));
        }

        tracing::debug!(
            synonyms = mappings.synonyms.len(),
            short_names = mappings.short_names.len(),
            equivalences = mappings.equivalent_frameworks.len(),
            mappings = mappings.compatibility.len(),
            "Loaded mapping overrides"
        );

        Ok(mappings)
    }
}

impl FrameworkMappings for OverrideMappings {
    fn identifier_synonyms(&self) -> &[(String, FrameworkName)] {
        &self.synonyms
    }

    fn identifier_short_names(&self) -> &[(FrameworkName, String)] {
        &self.short_names
    }

    fn equivalent_frameworks(&self) -> &[(FrameworkIdentity, FrameworkIdentity)] {
        &self.equivalent_frameworks
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
}

impl FrameworkNameProvider {
    /// A provider over the built-in tables with `overrides` layered on top.
    ///
    /// # Errors
    ///
    /// See [`OverrideMappings::from_overrides`].
    pub fn with_overrides(overrides: &MappingOverrides) -> Result<Self, ConfigError> {
        let defaults = DefaultFrameworkMappings::new();
        let portable = DefaultPortableFrameworkMappings::new();
        let extra = OverrideMappings::from_overrides(overrides)?;
        Ok(Self::new(&[&defaults, &extra], &[&portable]))
    }
}

fn resolve_identifier(names: &FrameworkNameProvider, id: &str) -> FrameworkName {
    let id = id.trim();
    names.identifier(id).unwrap_or_else(|| FrameworkName::new(id))
}

fn known_identifier(
    names: &FrameworkNameProvider,
    section: &'static str,
    index: usize,
    id: &str,
) -> Result<FrameworkName, ConfigError> {
    names.identifier(id.trim()).ok_or_else(|| ConfigError::Invalid {
        section,
        index,
        reason: format!("unknown framework identifier '{}'", id.trim()),
    })
}

fn parse_framework(
    names: &FrameworkNameProvider,
    section: &'static str,
    index: usize,
    token: &str,
) -> Result<FrameworkIdentity, ConfigError> {
    let framework = names.parse(token).map_err(|e| ConfigError::Invalid {
        section,
        index,
        reason: e.to_string(),
    })?;

    if !framework.is_specific() {
        return Err(ConfigError::Invalid {
            section,
            index,
            reason: format!("'{}' is not a known framework", token.trim()),
        });
    }

    Ok(framework)
}

fn range(
    section: &'static str,
    index: usize,
    min: FrameworkIdentity,
    max: FrameworkIdentity,
) -> Result<FrameworkRange, ConfigError> {
    if !min.same_except_version(&max) {
        return Err(ConfigError::Invalid {
            section,
            index,
            reason: "range bounds name different frameworks".to_string(),
        });
    }
    if min.version() > max.version() {
        return Err(ConfigError::Invalid {
            section,
            index,
            reason: "range minimum is above its maximum".to_string(),
        });
    }
    Ok(FrameworkRange::new(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::CompatibilityProvider;

    const TIZEN: &str = r#"
precedence = ["Tizen"]

[synonyms]
"Samsung.Tizen" = "tizen"

[short_names]
Tizen = "tizen"

[[compatibility]]
project = "tizen3"
supports = "netstandard1.6"

[[compatibility]]
project = "tizen4"
supports = "netstandard2.0"
"#;

    fn tizen() -> FrameworkNameProvider {
        let overrides = MappingOverrides::from_toml_str(TIZEN).unwrap();
        FrameworkNameProvider::with_overrides(&overrides).unwrap()
    }

    #[test]
    fn test_new_identifier_parses_and_formats() {
        let names = tizen();
        let tizen3 = names.parse("tizen3").unwrap();
        assert_eq!(tizen3.name().as_str(), "Tizen");
        assert_eq!(tizen3.version(), FrameworkVersion::from_major_minor(3, 0));
        assert_eq!(names.short_folder_name(&tizen3), "tizen3");
        assert_eq!(names.parse("Samsung.Tizen,Version=v3.0").unwrap(), tizen3);

        // the built-in provider has never heard of it
        let defaults = FrameworkNameProvider::with_defaults();
        assert!(defaults.parse("tizen3").unwrap().is_unsupported());
    }

    #[test]
    fn test_new_compatibility_edges() {
        let names = tizen();
        let compat = CompatibilityProvider::new(&names);
        let check = |project: &str, package: &str| {
            compat.is_compatible(&names.parse(project).unwrap(), &names.parse(package).unwrap())
        };

        assert!(check("tizen3", "netstandard1.6"));
        assert!(check("tizen3", "netstandard1.0"));
        assert!(!check("tizen3", "netstandard2.0"));
        assert!(check("tizen4", "netstandard2.0"));
        assert!(check("tizen4", "tizen3"));
        assert!(!check("netstandard1.6", "tizen3"));
    }

    #[test]
    fn test_unknown_token_rejected() {
        let overrides = MappingOverrides::from_toml_str(
            r#"
[[equivalent]]
a = "net45"
b = "madeup10"
"#,
        )
        .unwrap();
        let err = FrameworkNameProvider::with_overrides(&overrides).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                section: "equivalent",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_mismatched_range_rejected() {
        let overrides = MappingOverrides::from_toml_str(
            r#"
[[compatibility]]
project = "net45"
project_max = "win8"
supports = "netstandard1.0"
"#,
        )
        .unwrap();
        assert!(FrameworkNameProvider::with_overrides(&overrides).is_err());
    }

    #[test]
    fn test_equivalence_and_subset() {
        let overrides = MappingOverrides::from_toml_str(
            r#"
[short_names]
Tizen = "tizen"

[[equivalent]]
a = "tizen4"
b = "netstandard2.0"

[[subsets]]
subset = "netstandard"
superset = "tizen"
"#,
        )
        .unwrap();
        let names = FrameworkNameProvider::with_overrides(&overrides).unwrap();
        let tizen4 = names.parse("tizen4").unwrap();
        let netstandard = names.parse("netstandard2.0").unwrap();
        assert!(names.are_equivalent(&tizen4, &netstandard));
        assert_eq!(
            names.subset_frameworks(&FrameworkName::new("Tizen")),
            &[FrameworkName::new(".NETStandard")]
        );
    }
}
