//! Suite and environment data model.
//!
//! The model is built once by [`crate::config::loader`] and is immutable
//! afterwards: executors receive it by reference and never mutate it.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::interpolation::{resolve_template, TemplateContext};

/// A resolved environment-variable assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

/// A named, isolated execution context with its own dependencies and commands.
///
/// All pattern-matched keys are already resolved against this environment's
/// name; only `{posargs}` tokens in `commands` remain unresolved until run
/// time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
    /// Unique name within the suite, e.g. `py27` or `report`.
    pub name: String,

    /// Ordered package specifiers to install before running.
    pub deps: Vec<String>,

    /// Ordered environment-variable assignments applied to every command.
    pub setenv: Vec<EnvVar>,

    /// Ordered shell command templates; `{posargs}` resolved at run time.
    pub commands: Vec<String>,

    /// Names of environments that must complete before this one.
    pub depends: Vec<String>,

    /// Whether package installation should be skipped for this environment.
    pub skip_install: bool,
}

impl Environment {
    /// Create an empty environment with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deps: Vec::new(),
            setenv: Vec::new(),
            commands: Vec::new(),
            depends: Vec::new(),
            skip_install: false,
        }
    }

    /// Resolve command templates against caller-supplied positional arguments.
    pub fn resolve_commands(&self, posargs: &[String]) -> Vec<String> {
        let ctx = TemplateContext::for_env(&self.name).with_posargs(posargs);
        self.commands
            .iter()
            .map(|cmd| resolve_template(cmd, &ctx))
            .collect()
    }

    /// The resolved environment variables as a map, for process spawning.
    pub fn env_map(&self) -> HashMap<String, String> {
        self.setenv
            .iter()
            .map(|var| (var.name.clone(), var.value.clone()))
            .collect()
    }
}

/// Metadata mapping an external CI system's interpreter versions to
/// environment names, e.g. `[gh-actions] 3.7 = py37`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CiMapping {
    /// The CI system's section name.
    pub system: String,

    /// Interpreter version to environment names, in declaration order.
    pub entries: Vec<(String, Vec<String>)>,
}

/// The full set of environments declared for a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suite {
    /// Environments in declaration order: envlist first, then any
    /// override-only environments.
    pub environments: Vec<Environment>,

    /// How many leading entries of `environments` form the default envlist.
    pub envlist_len: usize,

    /// CI interpreter-version mappings, one per CI section.
    pub ci_mappings: Vec<CiMapping>,
}

impl Suite {
    /// Look up an environment by name.
    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.name == name)
    }

    /// Whether the suite defines an environment with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.environment(name).is_some()
    }

    /// All environment names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.environments.iter().map(|e| e.name.as_str()).collect()
    }

    /// The default envlist: the environments run when none are selected.
    pub fn envlist(&self) -> &[Environment] {
        &self.environments[..self.envlist_len]
    }
}
