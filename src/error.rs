//! Error types for suiterun operations.
//!
//! This module defines [`SuiterunError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SuiterunError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SuiterunError::Other`) for unexpected errors
//! - Configuration errors are deterministic and fatal; there are no retries

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for suiterun operations.
#[derive(Debug, Error)]
pub enum SuiterunError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Malformed section or key syntax in the configuration source.
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A depends edge, envlist entry, or CI mapping names an environment
    /// that is not defined in the suite.
    #[error("Undefined environment '{name}' referenced from {referenced_from}")]
    UndefinedEnvironment {
        name: String,
        referenced_from: String,
    },

    /// Environment dependency cycle detected.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// An environment was requested by name but does not exist in the suite.
    #[error("Unknown environment: {name}")]
    UnknownEnvironment { name: String },

    /// Shell command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error wrapper.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for suiterun operations.
pub type Result<T> = std::result::Result<T, SuiterunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = SuiterunError::ConfigNotFound {
            path: PathBuf::from("/foo/suiterun.ini"),
        };
        assert!(err.to_string().contains("/foo/suiterun.ini"));
    }

    #[test]
    fn parse_error_displays_line_and_message() {
        let err = SuiterunError::ParseError {
            line: 7,
            message: "unterminated section header".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("unterminated section header"));
    }

    #[test]
    fn undefined_environment_displays_name_and_origin() {
        let err = SuiterunError::UndefinedEnvironment {
            name: "py36".into(),
            referenced_from: "depends of 'report'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("py36"));
        assert!(msg.contains("depends of 'report'"));
    }

    #[test]
    fn circular_dependency_displays_cycle() {
        let err = SuiterunError::CircularDependency {
            cycle: "a -> b -> a".into(),
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn unknown_environment_displays_name() {
        let err = SuiterunError::UnknownEnvironment {
            name: "py99".into(),
        };
        assert!(err.to_string().contains("py99"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = SuiterunError::CommandFailed {
            command: "pytest -vv".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("pytest -vv"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SuiterunError = io_err.into();
        assert!(matches!(err, SuiterunError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(SuiterunError::UnknownEnvironment { name: "x".into() })
        }
        assert!(returns_error().is_err());
    }
}
