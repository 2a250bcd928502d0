//! Suite construction from raw configuration.
//!
//! This module turns parsed sections into the [`Suite`] model:
//!
//! - `[suite]` names the default envlist
//! - `[env]` is the shared environment scope; its conditional lines are
//!   evaluated per environment name
//! - `[env:<name>]` overrides the shared scope for one environment; a key
//!   present there replaces the shared key entirely
//! - any other section is treated as a CI interpreter-version mapping
//!
//! Loading is pure: no IO happens in [`parse_suite`], and the returned
//! suite is immutable. All cross-references (depends edges, CI mappings)
//! are validated here, before anything executes.

use std::fs;
use std::path::Path;

use crate::config::conditions::parse_rules;
use crate::config::interpolation::{resolve_template, TemplateContext};
use crate::config::parser::{RawConfig, RawEntry, RawSection};
use crate::config::schema::{CiMapping, EnvVar, Environment, Suite};
use crate::error::{Result, SuiterunError};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "suiterun.ini";

/// Section holding the envlist.
const SUITE_SECTION: &str = "suite";
/// Shared environment scope section.
const ENV_SECTION: &str = "env";
/// Prefix for per-environment override sections.
const ENV_OVERRIDE_PREFIX: &str = "env:";

/// Load and resolve a suite from a file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist, otherwise whatever
/// [`parse_suite`] reports for its contents.
pub fn load_file(path: &Path) -> Result<Suite> {
    if !path.exists() {
        return Err(SuiterunError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading suite configuration");
    parse_suite(&source)
}

/// Parse configuration text into a fully resolved [`Suite`].
///
/// # Errors
///
/// - `ParseError` for malformed syntax, a missing `[suite]` section or
///   `envlist`, duplicate environment names, or malformed `setenv` /
///   `skip_install` values
/// - `UndefinedEnvironment` when an envlist entry, depends edge, or CI
///   mapping references an environment the suite does not define
pub fn parse_suite(source: &str) -> Result<Suite> {
    let raw = RawConfig::parse(source)?;

    let suite_section = raw
        .section(SUITE_SECTION)
        .ok_or_else(|| SuiterunError::ParseError {
            line: 1,
            message: format!("missing [{}] section", SUITE_SECTION),
        })?;

    let envlist = parse_envlist(suite_section)?;
    let base = raw.section(ENV_SECTION);

    // Override sections in declaration order.
    let overrides: Vec<(&str, &RawSection)> = raw
        .sections
        .iter()
        .filter_map(|s| {
            s.name
                .strip_prefix(ENV_OVERRIDE_PREFIX)
                .map(|name| (name.trim(), s))
        })
        .collect();

    // Environment order: envlist first, then override-only environments.
    let mut names: Vec<String> = envlist.clone();
    for (name, _) in &overrides {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    // An environment is defined by the shared scope or by its own section.
    if base.is_none() {
        for name in &envlist {
            if !overrides.iter().any(|(n, _)| n == name) {
                return Err(SuiterunError::UndefinedEnvironment {
                    name: name.clone(),
                    referenced_from: "envlist".into(),
                });
            }
        }
    }

    let mut environments = Vec::with_capacity(names.len());
    for name in &names {
        let section = overrides
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| *s);
        environments.push(resolve_environment(name, base, section)?);
    }

    // Depends edges must reference defined environments. Cycles are the
    // dependency graph's concern, not the loader's.
    for env in &environments {
        for dep in &env.depends {
            if !names.iter().any(|n| n == dep) {
                return Err(SuiterunError::UndefinedEnvironment {
                    name: dep.clone(),
                    referenced_from: format!("depends of '{}'", env.name),
                });
            }
        }
    }

    let ci_mappings = resolve_ci_mappings(&raw, &names)?;

    Ok(Suite {
        environments,
        envlist_len: envlist.len(),
        ci_mappings,
    })
}

/// Parse the `envlist` key of the `[suite]` section.
fn parse_envlist(section: &RawSection) -> Result<Vec<String>> {
    let entry = section
        .entry("envlist")
        .ok_or_else(|| SuiterunError::ParseError {
            line: section.line,
            message: "missing 'envlist' in [suite] section".into(),
        })?;

    let names: Vec<String> = entry
        .value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(SuiterunError::ParseError {
            line: entry.line,
            message: "envlist declares no environments".into(),
        });
    }

    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            return Err(SuiterunError::ParseError {
                line: entry.line,
                message: format!("duplicate environment '{}' in envlist", name),
            });
        }
    }

    Ok(names)
}

/// Resolve one environment from the shared scope and its override section.
fn resolve_environment(
    name: &str,
    base: Option<&RawSection>,
    section: Option<&RawSection>,
) -> Result<Environment> {
    let mut env = Environment::new(name);
    let ctx = TemplateContext::for_env(name);

    if let Some(entry) = lookup(base, section, "deps") {
        env.deps = matching_values(entry, name)
            .map(|value| resolve_template(&value, &ctx))
            .collect();
    }

    if let Some(entry) = lookup(base, section, "setenv") {
        env.setenv = resolve_setenv(entry, name, &ctx)?;
    }

    if let Some(entry) = lookup(base, section, "commands") {
        env.commands = matching_values(entry, name).collect();
    }

    if let Some(entry) = lookup(base, section, "depends") {
        for value in matching_values(entry, name) {
            for dep in value.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                if !env.depends.iter().any(|d| d == dep) {
                    env.depends.push(dep.to_string());
                }
            }
        }
    }

    if let Some(entry) = lookup(base, section, "skip_install") {
        env.skip_install = match entry.value.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(SuiterunError::ParseError {
                    line: entry.line,
                    message: format!("skip_install must be true or false, got '{}'", other),
                })
            }
        };
    }

    Ok(env)
}

/// A key present in the override section replaces the shared key entirely.
fn lookup<'a>(
    base: Option<&'a RawSection>,
    section: Option<&'a RawSection>,
    key: &str,
) -> Option<&'a RawEntry> {
    section
        .and_then(|s| s.entry(key))
        .or_else(|| base.and_then(|s| s.entry(key)))
}

/// The rule values of a list-valued entry that apply to this environment,
/// in declaration order.
fn matching_values<'a>(entry: &'a RawEntry, name: &'a str) -> impl Iterator<Item = String> + 'a {
    parse_rules(&entry.value)
        .into_iter()
        .filter(move |rule| rule.applies_to(name))
        .map(|rule| rule.value)
        .filter(|value| !value.is_empty())
}

/// Resolve setenv lines into ordered assignments.
///
/// A later matching line overrides an earlier one for the same variable
/// name; ordering otherwise follows first declaration.
fn resolve_setenv(entry: &RawEntry, name: &str, ctx: &TemplateContext) -> Result<Vec<EnvVar>> {
    let mut vars: Vec<EnvVar> = Vec::new();

    for value in matching_values(entry, name) {
        let (var_name, var_value) =
            value
                .split_once('=')
                .ok_or_else(|| SuiterunError::ParseError {
                    line: entry.line,
                    message: format!("setenv entry '{}' is not NAME=value", value),
                })?;

        let var = EnvVar {
            name: var_name.trim().to_string(),
            value: resolve_template(var_value.trim(), ctx),
        };

        match vars.iter_mut().find(|v| v.name == var.name) {
            Some(existing) => existing.value = var.value,
            None => vars.push(var),
        }
    }

    Ok(vars)
}

/// Interpret all remaining sections as CI interpreter-version mappings.
fn resolve_ci_mappings(raw: &RawConfig, names: &[String]) -> Result<Vec<CiMapping>> {
    let mut mappings = Vec::new();

    for section in &raw.sections {
        if section.name == SUITE_SECTION
            || section.name == ENV_SECTION
            || section.name.starts_with(ENV_OVERRIDE_PREFIX)
        {
            continue;
        }

        let mut entries = Vec::new();
        for entry in &section.entries {
            let envs: Vec<String> = entry
                .value
                .split([',', '\n'])
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();

            for env in &envs {
                if !names.iter().any(|n| n == env) {
                    return Err(SuiterunError::UndefinedEnvironment {
                        name: env.clone(),
                        referenced_from: format!("[{}] mapping", section.name),
                    });
                }
            }

            entries.push((entry.key.clone(), envs));
        }

        mappings.push(CiMapping {
            system: section.name.clone(),
            entries,
        });
    }

    Ok(mappings)
}
