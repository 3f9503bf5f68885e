//! Parse command

use crate::output::{self, FrameworkSummary};
use anyhow::Result;
use tfm_core::FrameworkNameProvider;

/// Print the canonical names of each token
pub fn parse(names: &FrameworkNameProvider, tokens: &[String], json: bool) -> Result<()> {
    let frameworks = crate::parse_tokens(names, tokens)?;

    if json {
        return output::print_json(&output::summaries(names, &frameworks));
    }

    let mut table = output::table(&["token", "folder name", "full name"]);
    for (token, framework) in tokens.iter().zip(&frameworks) {
        let summary = FrameworkSummary::new(names, framework);
        table.add_row(vec![token.clone(), summary.short_name, summary.full_name]);
    }
    println!("{table}");

    Ok(())
}
