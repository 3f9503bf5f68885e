//! tfm - target framework inspector
//!
//! Command-line front end over `tfm-core`. Every command parses its
//! framework tokens, runs one engine operation and prints the answer either
//! as a table or, with `--json`, as a JSON document.
//!
//! Extra mapping data can be layered over the built-in tables with
//! `--mappings <FILE>` (or `TFM_MAPPINGS`).

#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tfm_core::{FrameworkIdentity, FrameworkNameProvider, MappingOverrides};

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "tfm")]
#[command(author, version, about = "tfm - target framework compatibility inspector")]
pub struct Cli {
    /// TOML file with extra identifier names and compatibility mappings
    #[arg(long, global = true, env = "TFM_MAPPINGS")]
    pub mappings: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse framework tokens and print their canonical names
    Parse {
        /// Folder names (net45, portable-net45+win8) or long names
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// Check whether a project can consume a package
    Compat {
        /// Framework of the consuming project
        project: String,
        /// Framework the package was built for
        package: String,
    },
    /// Pick the candidate a project should use
    Nearest {
        /// Framework of the consuming project
        project: String,
        /// Frameworks the package provides
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// Reduce a set of frameworks
    Reduce {
        /// Keep only the most specific frameworks
        #[arg(long, conflicts_with_all = ["downwards", "equivalent"])]
        upwards: bool,
        /// Keep only the least specific frameworks
        #[arg(long, conflicts_with = "equivalent")]
        downwards: bool,
        /// Collapse equivalent frameworks
        #[arg(long)]
        equivalent: bool,
        /// Frameworks to reduce
        #[arg(required = true)]
        tokens: Vec<String>,
    },
    /// List the frameworks a framework implies
    Expand {
        /// Framework to expand
        token: String,
        /// Follow expansions until nothing new is found
        #[arg(long)]
        transitive: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

/// Build the name provider, layering the override file when one is given.
pub fn load_provider(mappings: Option<&Path>) -> Result<FrameworkNameProvider> {
    let Some(path) = mappings else {
        return Ok(FrameworkNameProvider::with_defaults());
    };

    let overrides = MappingOverrides::load(path)
        .with_context(|| format!("Failed to load mappings from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded mapping overrides");

    FrameworkNameProvider::with_overrides(&overrides)
        .with_context(|| format!("Invalid mappings in {}", path.display()))
}

/// Parse one token, naming it in the error.
pub fn parse_token(names: &FrameworkNameProvider, token: &str) -> Result<FrameworkIdentity> {
    names
        .parse(token)
        .with_context(|| format!("Failed to parse framework '{token}'"))
}

/// Parse every token, stopping at the first failure.
pub fn parse_tokens(names: &FrameworkNameProvider, tokens: &[String]) -> Result<Vec<FrameworkIdentity>> {
    tokens.iter().map(|t| parse_token(names, t)).collect()
}
