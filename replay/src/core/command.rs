//! Pure parsing of dispatcher input lines.
//!
//! One line of input becomes one [`Request`]. The verb is case-insensitive
//! and argument counts are exact; anything off is a [`ParseError`] the
//! dispatcher reports without ending the loop.

use std::fmt;

pub const REPRODUCE_USAGE: &str = "reproduce <commit>";
pub const COMPARE_USAGE: &str = "compare <commit1> <commit2>";
pub const CLEANUP_USAGE: &str = "cleanup <commit|all>";

/// Cleanup scope: one commit's checkout or every checkout under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupTarget {
    All,
    Commit(String),
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Empty,
    Help,
    Exit,
    Reproduce { commit: String },
    Compare { left: String, right: String },
    Cleanup { target: CleanupTarget },
}

/// Why a line failed to parse. Reported to the user, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Wrong argument count for a known verb.
    Usage { usage: &'static str },
    /// First token is not a verb we know.
    UnknownVerb { verb: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Usage { usage } => write!(f, "usage: {usage}"),
            ParseError::UnknownVerb { verb } => {
                write!(f, "unknown command: {verb}. Type 'help' to list commands.")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse one input line into a request.
///
/// Surrounding whitespace is ignored and a blank line parses to
/// [`Request::Empty`]. `exit` and `help` tolerate trailing tokens; the
/// three operational verbs do not.
pub fn parse_line(line: &str) -> Result<Request, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(Request::Empty);
    };
    match verb.to_ascii_lowercase().as_str() {
        "exit" => Ok(Request::Exit),
        "help" => Ok(Request::Help),
        "reproduce" => match args {
            [commit] => Ok(Request::Reproduce {
                commit: (*commit).to_string(),
            }),
            _ => Err(ParseError::Usage {
                usage: REPRODUCE_USAGE,
            }),
        },
        "compare" => match args {
            [left, right] => Ok(Request::Compare {
                left: (*left).to_string(),
                right: (*right).to_string(),
            }),
            _ => Err(ParseError::Usage {
                usage: COMPARE_USAGE,
            }),
        },
        "cleanup" => match args {
            [target] => Ok(Request::Cleanup {
                target: parse_cleanup_target(target),
            }),
            _ => Err(ParseError::Usage {
                usage: CLEANUP_USAGE,
            }),
        },
        _ => Err(ParseError::UnknownVerb {
            verb: (*verb).to_string(),
        }),
    }
}

fn parse_cleanup_target(token: &str) -> CleanupTarget {
    if token.eq_ignore_ascii_case("all") {
        CleanupTarget::All
    } else {
        CleanupTarget::Commit(token.to_string())
    }
}
