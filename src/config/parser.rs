//! Section-based configuration parsing.
//!
//! This module parses the raw text format into ordered sections of key/value
//! entries, without interpreting any of them. Interpretation (envlist,
//! conditional lines, interpolation) happens in [`crate::config::loader`].
//!
//! # Format
//!
//! - `[name]` starts a section; the name must be non-empty and the closing
//!   bracket must be present.
//! - `key = value` assigns a value within the current section.
//! - Indented lines continue the value of the previous key, one logical
//!   line per physical line.
//! - Lines starting with `#` or `;` are comments; blank lines are skipped.
//!
//! # Example
//!
//! ```
//! use suiterun::config::RawConfig;
//!
//! let raw = RawConfig::parse("[suite]\nenvlist = py27, py37\n").unwrap();
//! let suite = raw.section("suite").unwrap();
//! assert_eq!(suite.get("envlist"), Some("py27, py37"));
//! ```

use crate::error::{Result, SuiterunError};

/// A single `key = value` entry, with the line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// A named section with its entries in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub name: String,
    pub entries: Vec<RawEntry>,
    pub line: usize,
}

impl RawSection {
    /// Look up a key's value. Later entries shadow earlier ones.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Look up a key's entry, including its source line.
    pub fn entry(&self, key: &str) -> Option<&RawEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }
}

/// A parsed configuration: sections in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawConfig {
    pub sections: Vec<RawSection>,
}

impl RawConfig {
    /// Parse configuration text into raw sections.
    pub fn parse(source: &str) -> Result<RawConfig> {
        let mut sections: Vec<RawSection> = Vec::new();

        for (idx, raw_line) in source.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw_line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Continuation lines are indented; check before trimming start.
            let is_continuation = raw_line.starts_with(' ') || raw_line.starts_with('\t');

            if !is_continuation && trimmed.starts_with('[') {
                let name = Self::parse_header(trimmed, line_no)?;
                sections.push(RawSection {
                    name,
                    entries: Vec::new(),
                    line: line_no,
                });
                continue;
            }

            let section = sections.last_mut().ok_or_else(|| SuiterunError::ParseError {
                line: line_no,
                message: format!("entry '{}' before any section header", trimmed),
            })?;

            if is_continuation {
                let entry = section
                    .entries
                    .last_mut()
                    .ok_or_else(|| SuiterunError::ParseError {
                        line: line_no,
                        message: format!("continuation line '{}' without a preceding key", trimmed),
                    })?;
                if !entry.value.is_empty() {
                    entry.value.push('\n');
                }
                entry.value.push_str(trimmed);
                continue;
            }

            let (key, value) = Self::parse_assignment(trimmed, line_no)?;
            section.entries.push(RawEntry {
                key,
                value,
                line: line_no,
            });
        }

        Ok(RawConfig { sections })
    }

    /// Parse a `[name]` header, returning the section name.
    fn parse_header(line: &str, line_no: usize) -> Result<String> {
        let inner = line
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| SuiterunError::ParseError {
                line: line_no,
                message: format!("unterminated section header '{}'", line),
            })?;

        let name = inner.trim();
        if name.is_empty() {
            return Err(SuiterunError::ParseError {
                line: line_no,
                message: "empty section name".into(),
            });
        }

        Ok(name.to_string())
    }

    /// Parse a `key = value` assignment.
    fn parse_assignment(line: &str, line_no: usize) -> Result<(String, String)> {
        let eq_pos = line.find('=').ok_or_else(|| SuiterunError::ParseError {
            line: line_no,
            message: format!("expected 'key = value', got '{}'", line),
        })?;

        let key = line[..eq_pos].trim();
        if key.is_empty() {
            return Err(SuiterunError::ParseError {
                line: line_no,
                message: "empty key in assignment".into(),
            });
        }

        Ok((key.to_string(), line[eq_pos + 1..].trim().to_string()))
    }

    /// Find a section by name. The first declaration wins.
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}
