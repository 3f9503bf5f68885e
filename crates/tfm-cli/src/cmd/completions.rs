//! Completions command

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

/// Write the completion script for `shell` to `out`
pub fn completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cli = crate::Cli::command();
    let bin = cli.get_name().to_string();
    generate(shell, &mut cli, bin, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_cover_subcommands() {
        let mut buf = Vec::new();
        completions(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        for command in ["parse", "compat", "nearest", "reduce", "expand"] {
            assert!(script.contains(command), "missing {command}");
        }
    }
}
