//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ListArgs, OrderArgs, RunArgs, ShowArgs};
pub use commands::CommandDispatcher;
