//! Environment ordering and execution.

pub mod dependency;
pub mod executor;

pub use dependency::{resolve_order, DependencyGraph, DependencyGraphBuilder};
pub use executor::{EnvOutcome, Executor, ExecutorOptions};
