//! Substitution tokens in configuration values.
//!
//! Values may contain `{token}` substitutions:
//!
//! - `{envname}` - replaced with the current environment name
//! - `{posargs}` - replaced with caller-supplied positional arguments
//! - `{posargs:<default>}` - as above, falling back to `<default>` when no
//!   arguments are supplied
//! - `{{` and `}}` - literal braces
//!
//! Tokens that are not recognized are left in place verbatim, so condition
//! braces stripped earlier and command syntax like `${VAR}` pass through
//! untouched.
//!
//! # Example
//!
//! ```
//! use suiterun::config::{resolve_template, TemplateContext};
//!
//! let ctx = TemplateContext::for_env("py27").with_posargs(&[]);
//! let cmd = resolve_template("pytest --cov=odin_devices {posargs:-vv}", &ctx);
//! assert_eq!(cmd, "pytest --cov=odin_devices -vv");
//! ```

/// A segment of a templated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text.
    Literal(String),
    /// Token content between braces, e.g. `envname` or `posargs:-vv`.
    Token(String),
}

/// Parse a string containing `{token}` substitutions into segments.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                current_literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                current_literal.push('}');
            }
            '{' => {
                let mut token = String::new();
                let mut closed = false;
                let mut depth = 0u32;
                for t in chars.by_ref() {
                    match t {
                        '{' => {
                            depth += 1;
                            token.push(t);
                        }
                        '}' if depth > 0 => {
                            depth -= 1;
                            token.push(t);
                        }
                        '}' => {
                            closed = true;
                            break;
                        }
                        _ => token.push(t),
                    }
                }

                if closed {
                    if !current_literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                    }
                    segments.push(Segment::Token(token));
                } else {
                    // Unterminated brace: keep it as literal text.
                    current_literal.push('{');
                    current_literal.push_str(&token);
                }
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Context for token resolution.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    /// Current environment name, substituted for `{envname}`.
    pub envname: &'a str,
    /// Positional arguments for `{posargs}`. `None` leaves posargs tokens
    /// in place (load-time resolution); `Some(&[])` selects the default.
    pub posargs: Option<&'a [String]>,
}

impl<'a> TemplateContext<'a> {
    /// Context for load-time resolution: envname only.
    pub fn for_env(envname: &'a str) -> Self {
        Self {
            envname,
            posargs: None,
        }
    }

    /// Attach positional arguments for command resolution.
    pub fn with_posargs(mut self, posargs: &'a [String]) -> Self {
        self.posargs = Some(posargs);
        self
    }
}

/// Resolve all recognized tokens in a templated string.
///
/// Single pass: escapes are collapsed exactly once and unrecognized
/// tokens are re-emitted with their braces.
pub fn resolve_template(input: &str, ctx: &TemplateContext) -> String {
    let mut result = String::new();

    for segment in parse_template(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Token(token) => match resolve_token(&token, ctx) {
                Some(value) => result.push_str(&value),
                None => {
                    result.push('{');
                    result.push_str(&token);
                    result.push('}');
                }
            },
        }
    }

    result
}

/// Resolve a single token, or `None` to leave it verbatim.
fn resolve_token(token: &str, ctx: &TemplateContext) -> Option<String> {
    if token == "envname" {
        return Some(ctx.envname.to_string());
    }

    if token == "posargs" || token.starts_with("posargs:") {
        let args = ctx.posargs?;
        if !args.is_empty() {
            return Some(args.join(" "));
        }
        let default = token.strip_prefix("posargs:").unwrap_or("");
        return Some(default.to_string());
    }

    None
}
