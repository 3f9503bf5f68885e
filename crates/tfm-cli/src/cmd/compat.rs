//! Compat command

use crate::output;
use anyhow::Result;
use crossterm::style::Stylize;
use serde::Serialize;
use tfm_core::{CompatibilityProvider, FrameworkNameProvider};

#[derive(Serialize)]
struct CompatReport {
    project: String,
    package: String,
    compatible: bool,
}

/// Check whether `project` can consume `package`
pub fn compat(names: &FrameworkNameProvider, project: &str, package: &str, json: bool) -> Result<()> {
    let project = crate::parse_token(names, project)?;
    let package = crate::parse_token(names, package)?;

    let compatible = CompatibilityProvider::new(names).is_compatible(&project, &package);

    if json {
        return output::print_json(&CompatReport {
            project: names.short_folder_name(&project),
            package: names.short_folder_name(&package),
            compatible,
        });
    }

    if compatible {
        println!("{}", "true".green());
    } else {
        println!("{}", "false".red());
    }

    Ok(())
}
