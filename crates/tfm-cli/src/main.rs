//! tfm - target framework inspector CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tfm_cli::cmd;
use tfm_cli::cmd::reduce::ReduceMode;
use tfm_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; -v only changes the default
    let default_filter = if cli.verbose { "tfm_core=debug,tfm_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        return cmd::completions::completions(shell, &mut std::io::stdout().lock());
    }

    let names = tfm_cli::load_provider(cli.mappings.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Parse { tokens } => cmd::parse::parse(&names, &tokens, json),
        Commands::Compat { project, package } => cmd::compat::compat(&names, &project, &package, json),
        Commands::Nearest {
            project,
            candidates,
        } => cmd::nearest::nearest(&names, &project, &candidates, json),
        Commands::Reduce {
            upwards,
            downwards,
            equivalent,
            tokens,
        } => {
            let mode = ReduceMode::from_flags(upwards, downwards, equivalent);
            cmd::reduce::reduce(&names, &tokens, mode, json)
        }
        Commands::Expand { token, transitive } => cmd::expand::expand(&names, &token, transitive, json),
        Commands::Completions { .. } => Ok(()),
    }
}
