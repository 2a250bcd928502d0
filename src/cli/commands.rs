//! Command dispatch.
//!
//! The dispatcher loads the suite once and routes each subcommand to its
//! handler. All handlers work against the immutable [`Suite`]; nothing
//! here mutates configuration state.

use std::path::PathBuf;

use console::style;
use serde_json::json;

use crate::cli::args::{Cli, Commands, ListArgs, OrderArgs, RunArgs, ShowArgs};
use crate::config::{load_file, Suite, DEFAULT_CONFIG};
use crate::error::Result;
use crate::runner::{resolve_order, Executor, ExecutorOptions};

/// Routes parsed CLI arguments to command handlers.
pub struct CommandDispatcher {
    config_path: PathBuf,
    quiet: bool,
}

impl CommandDispatcher {
    pub fn new(config_path: PathBuf, quiet: bool) -> Self {
        Self { config_path, quiet }
    }

    /// The config path for a CLI invocation: explicit flag or the default
    /// file in the working directory.
    pub fn config_path(cli: &Cli) -> PathBuf {
        cli.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }

    /// Dispatch to the handler for the given command.
    pub fn dispatch(&self, cli: &Cli) -> Result<()> {
        let suite = load_file(&self.config_path)?;

        match &cli.command {
            Some(Commands::Run(args)) => self.run(&suite, args),
            Some(Commands::List(args)) => self.list(&suite, args),
            Some(Commands::Show(args)) => self.show(&suite, args),
            Some(Commands::Order(args)) => self.order(&suite, args),
            None => self.run(&suite, &RunArgs::default()),
        }
    }

    fn run(&self, suite: &Suite, args: &RunArgs) -> Result<()> {
        let options = ExecutorOptions {
            posargs: args.posargs.clone(),
            dry_run: args.dry_run,
            cwd: None,
        };

        let outcomes = Executor::new(suite, options).run(&args.envs)?;

        if self.quiet {
            return Ok(());
        }

        if args.dry_run {
            println!("{}", style("dry run: nothing executed").dim());
            return Ok(());
        }

        println!();
        for outcome in &outcomes {
            println!(
                "  {} {} ({} commands in {:.1?})",
                style("ok").green().bold(),
                outcome.name,
                outcome.commands_run,
                outcome.duration,
            );
        }
        println!(
            "{}",
            style(format!("{} environments succeeded", outcomes.len())).bold()
        );

        Ok(())
    }

    fn list(&self, suite: &Suite, args: &ListArgs) -> Result<()> {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&suite.environments)?);
            return Ok(());
        }

        let default_names: Vec<&str> = suite.envlist().iter().map(|e| e.name.as_str()).collect();

        for env in &suite.environments {
            let marker = if default_names.contains(&env.name.as_str()) {
                style("*").green()
            } else {
                style(" ").dim()
            };
            println!(
                "{} {:<12} {} commands, {} deps{}",
                marker,
                style(&env.name).bold(),
                env.commands.len(),
                env.deps.len(),
                if env.depends.is_empty() {
                    String::new()
                } else {
                    format!(", after {}", env.depends.join(", "))
                },
            );
        }

        if !self.quiet {
            println!("{}", style("* in default envlist").dim());
        }

        Ok(())
    }

    fn show(&self, suite: &Suite, args: &ShowArgs) -> Result<()> {
        let env = suite.environment(&args.env).ok_or_else(|| {
            crate::error::SuiterunError::UnknownEnvironment {
                name: args.env.clone(),
            }
        })?;

        let commands = env.resolve_commands(&args.posargs);

        if args.json {
            let value = json!({
                "name": env.name,
                "deps": env.deps,
                "setenv": env.setenv,
                "commands": commands,
                "depends": env.depends,
                "skip_install": env.skip_install,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            return Ok(());
        }

        println!("{}", style(&env.name).bold());
        if env.skip_install {
            println!("  skip_install = true");
        }
        if !env.deps.is_empty() {
            println!("  deps:");
            for dep in &env.deps {
                println!("    {}", dep);
            }
        }
        if !env.setenv.is_empty() {
            println!("  setenv:");
            for var in &env.setenv {
                println!("    {}={}", var.name, var.value);
            }
        }
        if !env.depends.is_empty() {
            println!("  depends: {}", env.depends.join(", "));
        }
        println!("  commands:");
        for command in &commands {
            println!("    {}", command);
        }

        Ok(())
    }

    fn order(&self, suite: &Suite, args: &OrderArgs) -> Result<()> {
        let ordered = resolve_order(suite)?;
        let names: Vec<&str> = ordered.iter().map(|e| e.name.as_str()).collect();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&names)?);
            return Ok(());
        }

        for name in names {
            println!("{}", name);
        }

        Ok(())
    }
}
