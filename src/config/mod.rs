//! Configuration loading, parsing, and resolution.
//!
//! This module handles all aspects of configuration:
//! - Raw section parsing in [`parser`]
//! - The suite/environment data model in [`schema`]
//! - Conditional line rules in [`conditions`]
//! - Substitution tokens in [`interpolation`]
//! - Suite construction and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use suiterun::config::parse_suite;
//!
//! let suite = parse_suite(
//!     "[suite]\nenvlist = py37\n[env]\ncommands = pytest {posargs:-vv}\n",
//! )
//! .unwrap();
//!
//! let env = suite.environment("py37").unwrap();
//! assert_eq!(env.resolve_commands(&[]), vec!["pytest -vv"]);
//! ```

pub mod conditions;
pub mod interpolation;
pub mod loader;
pub mod parser;
pub mod schema;

// Schema re-exports
pub use schema::{CiMapping, EnvVar, Environment, Suite};

// Loader re-exports
pub use loader::{load_file, parse_suite, DEFAULT_CONFIG};

// Parser re-exports
pub use parser::{RawConfig, RawEntry, RawSection};

// Conditions re-exports
pub use conditions::{expand_match_expr, parse_rule, parse_rules, Rule};

// Interpolation re-exports
pub use interpolation::{parse_template, resolve_template, Segment, TemplateContext};
