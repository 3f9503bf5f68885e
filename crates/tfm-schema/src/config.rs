//! On-disk schema for mapping overrides.
//!
//! A mapping override file layers extra identifier names and compatibility
//! edges on top of the built-in tables. Frameworks are written as folder-name
//! tokens (`tizen3`, `net45`); `tfm-core` parses them when the overrides are
//! turned into a mapping source.
//!
//! ```toml
//! precedence = ["Tizen"]
//!
//! [synonyms]
//! "Samsung.Tizen" = "Tizen"
//!
//! [short_names]
//! Tizen = "tizen"
//!
//! [[equivalent]]
//! a = "tizen"
//! b = "tizen3"
//!
//! [[compatibility]]
//! project = "tizen3"
//! supports = "netstandard1.6"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors produced while loading or validating a mapping override file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read mapping overrides from {path}: {source}")]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse mapping overrides: {0}")]
    Toml(#[from] toml::de::Error),

    /// An entry is structurally valid TOML but semantically unusable.
    #[error("Invalid {section} entry #{index}: {reason}")]
    Invalid {
        /// Table the entry belongs to.
        section: &'static str,
        /// Zero-based position of the entry in its table.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },
}

/// A two-way equivalence between two frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalentPair {
    /// First framework token.
    pub a: String,
    /// Second framework token.
    pub b: String,
}

/// A one-way compatibility edge: projects in the `project` range may consume
/// packages in the `supports` range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    /// Lowest project framework the rule applies to.
    pub project: String,
    /// Highest project framework the rule applies to; open-ended when absent.
    #[serde(default)]
    pub project_max: Option<String>,
    /// Highest package framework the project may consume.
    pub supports: String,
    /// Lowest package framework the project may consume; version zero when absent.
    #[serde(default)]
    pub supports_min: Option<String>,
}

/// Frameworks of the `subset` identifier are usable wherever the `superset`
/// identifier is, at the same version and profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetRule {
    /// Identifier whose frameworks are implied.
    pub subset: String,
    /// Identifier that implies them.
    pub superset: String,
}

/// Additional mapping data layered over the built-in tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOverrides {
    /// Alternate spellings mapped to canonical identifiers.
    pub synonyms: BTreeMap<String, String>,
    /// Canonical identifiers mapped to their folder-name short form.
    pub short_names: BTreeMap<String, String>,
    /// Two-way framework equivalences.
    pub equivalent: Vec<EquivalentPair>,
    /// One-way compatibility edges.
    pub compatibility: Vec<CompatibilityRule>,
    /// Identifier subset relations.
    pub subsets: Vec<SubsetRule>,
    /// Identifiers appended to the tie-break precedence list.
    pub precedence: Vec<String>,
}

impl MappingOverrides {
    /// Load overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or any error
    /// from [`MappingOverrides::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate overrides from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] for malformed TOML and
    /// [`ConfigError::Invalid`] for entries with blank fields.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let overrides: Self = toml::from_str(content)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// True when no table has any entries.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
            && self.short_names.is_empty()
            && self.equivalent.is_empty()
            && self.compatibility.is_empty()
            && self.subsets.is_empty()
            && self.precedence.is_empty()
    }

    /// Check that every entry has its required fields filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn blank(section: &'static str, index: usize, field: &str) -> ConfigError {
            ConfigError::Invalid {
                section,
                index,
                reason: format!("'{field}' must not be empty"),
            }
        }

        for (index, (name, identifier)) in self.synonyms.iter().enumerate() {
            if name.trim().is_empty() || identifier.trim().is_empty() {
                return Err(blank("synonyms", index, "identifier"));
            }
        }

        for (index, (identifier, short)) in self.short_names.iter().enumerate() {
            if identifier.trim().is_empty() || short.trim().is_empty() {
                return Err(blank("short_names", index, "short"));
            }
        }

        for (index, pair) in self.equivalent.iter().enumerate() {
            if pair.a.trim().is_empty() {
                return Err(blank("equivalent", index, "a"));
            }
            if pair.b.trim().is_empty() {
                return Err(blank("equivalent", index, "b"));
            }
        }

        for (index, rule) in self.compatibility.iter().enumerate() {
            if rule.project.trim().is_empty() {
                return Err(blank("compatibility", index, "project"));
            }
            if rule.supports.trim().is_empty() {
                return Err(blank("compatibility", index, "supports"));
            }
        }

        for (index, rule) in self.subsets.iter().enumerate() {
            if rule.subset.trim().is_empty() || rule.superset.trim().is_empty() {
                return Err(blank("subsets", index, "subset"));
            }
        }

        if let Some(index) = self.precedence.iter().position(|p| p.trim().is_empty()) {
            return Err(blank("precedence", index, "precedence"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
precedence = ["Tizen"]

[synonyms]
"Samsung.Tizen" = "Tizen"

[short_names]
Tizen = "tizen"

[[equivalent]]
a = "tizen"
b = "tizen3"

[[compatibility]]
project = "tizen3"
supports = "netstandard1.6"
"#;

    #[test]
    fn test_parse_sample() {
        let overrides = MappingOverrides::from_toml_str(SAMPLE).unwrap();
        assert_eq!(overrides.synonyms.get("Samsung.Tizen").unwrap(), "Tizen");
        assert_eq!(overrides.short_names.get("Tizen").unwrap(), "tizen");
        assert_eq!(overrides.equivalent.len(), 1);
        assert_eq!(overrides.compatibility[0].supports, "netstandard1.6");
        assert!(overrides.compatibility[0].project_max.is_none());
        assert!(overrides.subsets.is_empty());
        assert!(!overrides.is_empty());
    }

    #[test]
    fn test_empty_file_is_default() {
        let overrides = MappingOverrides::from_toml_str("").unwrap();
        assert!(overrides.is_empty());
        assert_eq!(overrides, MappingOverrides::default());
    }

    #[test]
    fn test_blank_entry_rejected() {
        let err = MappingOverrides::from_toml_str(
            r#"
[[compatibility]]
project = "tizen3"
supports = " "
"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                section: "compatibility",
                index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = MappingOverrides::from_toml_str("[[equivalent]]\na = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let overrides = MappingOverrides::load(file.path()).unwrap();
        assert_eq!(overrides.precedence, vec!["Tizen".to_string()]);

        let missing = MappingOverrides::load(Path::new("/nonexistent/tfm.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
