//! Output helpers shared by the commands.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use tfm_core::{FrameworkIdentity, FrameworkNameProvider, Profile};

/// The JSON shape of one framework.
#[derive(Debug, Clone, Serialize)]
pub struct FrameworkSummary {
    /// Folder-name form, e.g. `net40-client`.
    pub short_name: String,
    /// Long form, e.g. `.NETFramework,Version=v4.0,Profile=Client`.
    pub full_name: String,
    /// Canonical identifier.
    pub identifier: String,
    /// Version, `major.minor` at least.
    pub version: String,
    /// Named profile, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    /// Portable profile number, when the member set has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portable_profile: Option<u32>,
    /// Members of a portable framework, in folder-name form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub portable_frameworks: Vec<String>,
}

impl FrameworkSummary {
    /// Describe `framework` using the names in `names`.
    pub fn new(names: &FrameworkNameProvider, framework: &FrameworkIdentity) -> Self {
        let (profile, portable_profile, portable_frameworks) = match framework.profile() {
            Profile::Exact(p) if !p.is_empty() => (Some(p.clone()), None, Vec::new()),
            Profile::Exact(_) => (None, None, Vec::new()),
            Profile::Portable(portable) => (
                None,
                portable.number(),
                portable
                    .frameworks()
                    .iter()
                    .map(|f| names.short_folder_name(f))
                    .collect(),
            ),
        };

        Self {
            short_name: names.short_folder_name(framework),
            full_name: names.full_name(framework),
            identifier: framework.identifier().to_string(),
            version: framework.version().to_string(),
            profile,
            portable_profile,
            portable_frameworks,
        }
    }
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A table with the house style applied.
pub fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Print one folder name per line.
pub fn print_short_names(names: &FrameworkNameProvider, frameworks: &[FrameworkIdentity]) {
    for framework in frameworks {
        println!("{}", names.short_folder_name(framework));
    }
}

/// Summaries for a list of frameworks.
pub fn summaries(names: &FrameworkNameProvider, frameworks: &[FrameworkIdentity]) -> Vec<FrameworkSummary> {
    frameworks
        .iter()
        .map(|f| FrameworkSummary::new(names, f))
        .collect()
}
