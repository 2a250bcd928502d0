//! suiterun - Declarative multi-environment test suite resolution.
//!
//! suiterun loads a section-based configuration declaring named test
//! environments - dependency lists, environment variables, shell commands,
//! and inter-environment ordering edges - resolves pattern-matched keys
//! per environment, orders environments topologically, and executes the
//! resolved commands.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration parsing and suite resolution
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Dependency ordering and sequential execution
//! - [`shell`] - Shell command execution
//!
//! # Example
//!
//! ```
//! use suiterun::config::parse_suite;
//! use suiterun::runner::resolve_order;
//!
//! let suite = parse_suite(
//!     "[suite]\n\
//!      envlist = clean, py37, report\n\
//!      [env]\n\
//!      commands = pytest {posargs:-vv}\n\
//!      depends =\n\
//!      \x20   py37: clean\n\
//!      \x20   report: py37\n",
//! )
//! .unwrap();
//!
//! let order = resolve_order(&suite).unwrap();
//! let names: Vec<_> = order.iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(names, vec!["clean", "py37", "report"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;

pub use error::{Result, SuiterunError};
