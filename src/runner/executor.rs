//! Sequential environment execution.
//!
//! The executor honors the ordering contract of
//! [`resolve_order`](crate::runner::resolve_order): an environment runs
//! only after everything it depends on has completed. Execution itself is
//! single-threaded; commands within an environment run in declared order
//! and the first failure aborts the run.
//!
//! Dependency installation stays external. The executor surfaces each
//! environment's resolved `deps` in its logs but never invokes an
//! installer itself.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::schema::{Environment, Suite};
use crate::error::{Result, SuiterunError};
use crate::runner::dependency::resolve_order;
use crate::shell::{execute, CommandOptions};

/// Options for a suite run.
#[derive(Debug, Clone, Default)]
pub struct ExecutorOptions {
    /// Positional arguments substituted for `{posargs}` tokens.
    pub posargs: Vec<String>,

    /// Print resolved commands without executing them.
    pub dry_run: bool,

    /// Working directory for all commands.
    pub cwd: Option<PathBuf>,
}

/// Outcome of one executed environment.
#[derive(Debug, Clone)]
pub struct EnvOutcome {
    pub name: String,
    pub commands_run: usize,
    pub duration: Duration,
}

/// Runs a suite's environments in dependency order.
#[derive(Debug)]
pub struct Executor<'a> {
    suite: &'a Suite,
    options: ExecutorOptions,
}

impl<'a> Executor<'a> {
    pub fn new(suite: &'a Suite, options: ExecutorOptions) -> Self {
        Self { suite, options }
    }

    /// Run the selected environments, or the default envlist when
    /// `selection` is empty.
    ///
    /// The selection keeps dependency order but does not pull in unselected
    /// dependencies; declaring `depends` promises ordering, not inclusion.
    pub fn run(&self, selection: &[String]) -> Result<Vec<EnvOutcome>> {
        for name in selection {
            if !self.suite.contains(name) {
                return Err(SuiterunError::UnknownEnvironment { name: name.clone() });
            }
        }

        let ordered = resolve_order(self.suite)?;
        let to_run: Vec<&Environment> = ordered
            .into_iter()
            .filter(|env| {
                if selection.is_empty() {
                    self.suite.envlist().iter().any(|e| e.name == env.name)
                } else {
                    selection.iter().any(|n| *n == env.name)
                }
            })
            .collect();

        let mut outcomes = Vec::with_capacity(to_run.len());
        for env in to_run {
            outcomes.push(self.run_environment(env)?);
        }

        Ok(outcomes)
    }

    fn run_environment(&self, env: &Environment) -> Result<EnvOutcome> {
        tracing::info!(env = %env.name, "running environment");

        if env.skip_install {
            tracing::debug!(env = %env.name, "package installation skipped");
        } else if !env.deps.is_empty() {
            tracing::debug!(
                env = %env.name,
                deps = ?env.deps,
                "dependencies expected to be installed externally"
            );
        }

        let commands = env.resolve_commands(&self.options.posargs);
        let mut duration = Duration::ZERO;

        for command in &commands {
            if self.options.dry_run {
                println!("[{}] {}", env.name, command);
                continue;
            }

            tracing::debug!(env = %env.name, %command, "executing");

            let options = CommandOptions {
                cwd: self.options.cwd.clone(),
                env: env.env_map(),
                capture_stdout: false,
                capture_stderr: false,
            };

            let result = execute(command, &options)?;
            duration += result.duration;

            if !result.success {
                return Err(SuiterunError::CommandFailed {
                    command: command.clone(),
                    code: result.exit_code,
                });
            }
        }

        Ok(EnvOutcome {
            name: env.name.clone(),
            commands_run: commands.len(),
            duration,
        })
    }
}
