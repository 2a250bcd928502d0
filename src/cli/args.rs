//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// suiterun - Declarative multi-environment test suite runner.
#[derive(Debug, Parser)]
#[command(name = "suiterun")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default suiterun.ini)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run environments in dependency order (default if no command specified)
    Run(RunArgs),

    /// List the suite's environments
    List(ListArgs),

    /// Show one environment's resolved configuration
    Show(ShowArgs),

    /// Show the resolved execution order
    Order(OrderArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Environments to run (default: the whole envlist)
    pub envs: Vec<String>,

    /// Preview resolved commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Positional arguments substituted for {posargs} tokens
    #[arg(last = true)]
    pub posargs: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Environment to show
    pub env: String,

    /// Emit JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Positional arguments substituted for {posargs} tokens
    #[arg(last = true)]
    pub posargs: Vec<String>,
}

/// Arguments for the `order` command.
#[derive(Debug, Clone, clap::Args)]
pub struct OrderArgs {
    /// Emit JSON instead of one name per line
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_envs_and_posargs() {
        let cli = Cli::parse_from(["suiterun", "run", "py37", "--", "-x", "-k", "smoke"]);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.envs, vec!["py37"]);
                assert_eq!(args.posargs, vec!["-x", "-k", "smoke"]);
                assert!(!args.dry_run);
            }
            other => panic!("expected run command, got {:?}", other),
        }
    }

    #[test]
    fn parses_global_config_flag() {
        let cli = Cli::parse_from(["suiterun", "--config", "alt.ini", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.ini")));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["suiterun"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_show_with_json() {
        let cli = Cli::parse_from(["suiterun", "show", "py37", "--json"]);
        match cli.command {
            Some(Commands::Show(args)) => {
                assert_eq!(args.env, "py37");
                assert!(args.json);
            }
            other => panic!("expected show command, got {:?}", other),
        }
    }
}
