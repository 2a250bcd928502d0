//! Conditional value lines.
//!
//! List-valued keys (`deps`, `setenv`, `commands`, `depends`) accept one
//! rule per line. A rule is either unconditional or prefixed with a match
//! expression naming the environments it applies to:
//!
//! ```text
//! deps =
//!     pytest
//!     py{27,37}: pytest-cov
//!     {clean,report}: coverage
//! ```
//!
//! A match expression is a comma-separated list of environment-name
//! patterns; `{a,b}` groups expand in place (`py{27,37}` matches `py27`
//! and `py37`). The colon introducing a value must be followed by
//! whitespace, so URLs and other colon-bearing values stay unconditional.

/// One line of a list-valued key.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Environment names this rule applies to; `None` means every environment.
    pub patterns: Option<Vec<String>>,
    /// The value with any match expression stripped.
    pub value: String,
}

impl Rule {
    /// Whether this rule applies to the named environment.
    pub fn applies_to(&self, env: &str) -> bool {
        match &self.patterns {
            None => true,
            Some(patterns) => patterns.iter().any(|p| p == env),
        }
    }
}

/// Parse a multi-line raw value into rules, one per non-empty line.
pub fn parse_rules(raw: &str) -> Vec<Rule> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_rule)
        .collect()
}

/// Parse a single line into a rule.
pub fn parse_rule(line: &str) -> Rule {
    match split_condition(line) {
        Some((expr, value)) => Rule {
            patterns: Some(expand_match_expr(expr)),
            value: value.to_string(),
        },
        None => Rule {
            patterns: None,
            value: line.to_string(),
        },
    }
}

/// Split `<match>: <value>` into its parts, if the line carries a condition.
///
/// The condition ends at the first colon followed by whitespace. The part
/// before it must look like a match expression (names, commas, braces);
/// anything else makes the whole line an unconditional value.
fn split_condition(line: &str) -> Option<(&str, &str)> {
    let bytes = line.as_bytes();
    let colon = line.find(':')?;

    if colon + 1 < bytes.len() && !bytes[colon + 1].is_ascii_whitespace() {
        return None;
    }

    let expr = &line[..colon];
    if expr.is_empty() || !is_match_expr(expr) {
        return None;
    }

    Some((expr, line[colon + 1..].trim_start()))
}

/// Whether a candidate condition consists only of pattern characters
/// with balanced braces.
fn is_match_expr(expr: &str) -> bool {
    let mut depth = 0i32;
    for c in expr.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            ',' | '-' | '_' | '.' => {}
            c if c.is_ascii_alphanumeric() => {}
            _ => return false,
        }
    }
    depth == 0
}

/// Expand a match expression into concrete environment names.
///
/// Splits on top-level commas, then expands `{a,b}` groups in each
/// pattern. Order follows the expression; duplicates are kept (matching
/// is a membership test, so they are harmless).
pub fn expand_match_expr(expr: &str) -> Vec<String> {
    split_top_level(expr)
        .into_iter()
        .flat_map(|pattern| expand_braces(&pattern))
        .collect()
}

/// Split on commas that are not inside a brace group.
fn split_top_level(expr: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for c in expr.chars() {
        match c {
            '{' => {
                depth += 1;
                current.push(c);
            }
            '}' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                if !current.trim().is_empty() {
                    parts.push(current.trim().to_string());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts
}

/// Expand the first `{a,b}` group and recurse on each alternative.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close_rel) = pattern[open..].find('}') else {
        return vec![pattern.to_string()];
    };
    let close = open + close_rel;

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    pattern[open + 1..close]
        .split(',')
        .map(str::trim)
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}
