//! Expand command

use crate::output;
use anyhow::Result;
use tfm_core::{FrameworkExpander, FrameworkIdentity, FrameworkNameProvider};

/// List the frameworks `token` implies, one hop or transitively
pub fn expand(names: &FrameworkNameProvider, token: &str, transitive: bool, json: bool) -> Result<()> {
    let framework = crate::parse_token(names, token)?;
    let expander = FrameworkExpander::new(names);

    let expanded: Vec<FrameworkIdentity> = if transitive {
        expander.expand_transitive(&framework)
    } else {
        expander.expand(&framework).collect()
    };

    if json {
        return output::print_json(&output::summaries(names, &expanded));
    }

    output::print_short_names(names, &expanded);
    Ok(())
}
