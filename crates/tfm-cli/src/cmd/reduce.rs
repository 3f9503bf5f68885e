//! Reduce command

use crate::output;
use anyhow::Result;
use crossterm::style::Stylize;
use tfm_core::{FrameworkNameProvider, FrameworkReducer};

/// Which reduction to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceMode {
    /// Group into mutually comparable sets.
    Groups,
    /// Most specific frameworks.
    Upwards,
    /// Least specific frameworks.
    Downwards,
    /// One representative per equivalence class.
    Equivalent,
}

impl ReduceMode {
    /// Pick the mode from the command-line flags; no flag means `Groups`.
    pub fn from_flags(upwards: bool, downwards: bool, equivalent: bool) -> Self {
        if upwards {
            Self::Upwards
        } else if downwards {
            Self::Downwards
        } else if equivalent {
            Self::Equivalent
        } else {
            Self::Groups
        }
    }
}

/// Reduce `tokens` and print the result
pub fn reduce(names: &FrameworkNameProvider, tokens: &[String], mode: ReduceMode, json: bool) -> Result<()> {
    let frameworks = crate::parse_tokens(names, tokens)?;
    let reducer = FrameworkReducer::new(names);

    let reduced = match mode {
        ReduceMode::Groups => return print_groups(names, &reducer.reduce(&frameworks), json),
        ReduceMode::Upwards => reducer.reduce_upwards(&frameworks),
        ReduceMode::Downwards => reducer.reduce_downwards(&frameworks),
        ReduceMode::Equivalent => reducer.reduce_equivalent(&frameworks),
    };

    if json {
        return output::print_json(&output::summaries(names, &reduced));
    }

    output::print_short_names(names, &reduced);
    Ok(())
}

fn print_groups(
    names: &FrameworkNameProvider,
    groups: &[Vec<tfm_core::FrameworkIdentity>],
    json: bool,
) -> Result<()> {
    if json {
        let groups: Vec<Vec<String>> = groups
            .iter()
            .map(|group| group.iter().map(|f| names.short_folder_name(f)).collect())
            .collect();
        return output::print_json(&groups);
    }

    for (index, group) in groups.iter().enumerate() {
        let members: Vec<String> = group.iter().map(|f| names.short_folder_name(f)).collect();
        println!("{} {}", format!("{}.", index + 1).dark_grey(), members.join(" "));
    }

    Ok(())
}
