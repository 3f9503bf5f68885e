//! Nearest command

use crate::output::{self, FrameworkSummary};
use anyhow::Result;
use crossterm::style::Stylize;
use tfm_core::{FrameworkNameProvider, FrameworkReducer};

/// Print the candidate a project should use, or `none`
pub fn nearest(
    names: &FrameworkNameProvider,
    project: &str,
    candidates: &[String],
    json: bool,
) -> Result<()> {
    let project = crate::parse_token(names, project)?;
    let candidates = crate::parse_tokens(names, candidates)?;

    let nearest = FrameworkReducer::new(names).get_nearest(&project, &candidates);

    if json {
        let summary = nearest.map(|f| FrameworkSummary::new(names, &f));
        return output::print_json(&summary);
    }

    match nearest {
        Some(framework) => println!("{}", names.short_folder_name(&framework)),
        None => println!("{}", "none".dark_grey()),
    }

    Ok(())
}
