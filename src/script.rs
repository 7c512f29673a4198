use thiserror::Error;

use crate::hash::{ActionToken, HashError};

// ---------------------------------------------------------------------------
// Session scripts
// ---------------------------------------------------------------------------

/// One step of a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `push <token> [<forced-hash>]`
    Push {
        token: String,
        forced_hash: Option<String>,
    },
    /// `pop <count> [stay]`
    Pop { count: usize, move_location: bool },
    /// `click <position>`: activate the n-th breadcrumb (1-based).
    Click { position: usize },
    /// Browser back button.
    Back,
    /// Browser forward button.
    Forward,
    /// `navigate <hash>`: the user edits the fragment by hand.
    Navigate { hash: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ScriptError {
    pub line: usize,
    pub kind: ScriptErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptErrorKind {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}` takes {max} argument(s), got {got}")]
    TooManyArguments {
        command: &'static str,
        max: usize,
        got: usize,
    },
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unknown pop flag {0:?} (expected \"stay\")")]
    UnknownFlag(String),
    #[error(transparent)]
    InvalidToken(#[from] HashError),
}

/// Parse a session script.
///
/// One command per line; blank lines and lines starting with `#` are skipped.
/// A `#` later on a line is part of the arguments (forced and navigated
/// hashes start with one).
///
/// ```text
/// push capture
/// push frame:12 #capture&frame:12
/// pop 1 stay
/// click 1
/// back
/// navigate #capture
/// ```
pub fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_line(line).map_err(|kind| ScriptError { line: i + 1, kind })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step, ScriptErrorKind> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    match command {
        "push" => {
            let token = ActionToken::parse(arg(&args, 0, "push", "a token")?)?;
            max_args(&args, 2, "push")?;
            Ok(Step::Push {
                token: token.into_string(),
                forced_hash: args.get(1).map(|s| (*s).to_owned()),
            })
        }
        "pop" => {
            let count = number(arg(&args, 0, "pop", "a count")?)?;
            max_args(&args, 2, "pop")?;
            let move_location = match args.get(1) {
                None => true,
                Some(&"stay") => false,
                Some(other) => return Err(ScriptErrorKind::UnknownFlag((*other).to_owned())),
            };
            Ok(Step::Pop {
                count,
                move_location,
            })
        }
        "click" => {
            let position = number(arg(&args, 0, "click", "a breadcrumb position")?)?;
            max_args(&args, 1, "click")?;
            Ok(Step::Click { position })
        }
        "back" => {
            max_args(&args, 0, "back")?;
            Ok(Step::Back)
        }
        "forward" => {
            max_args(&args, 0, "forward")?;
            Ok(Step::Forward)
        }
        "navigate" => {
            max_args(&args, 1, "navigate")?;
            // A missing argument navigates to the empty hash.
            Ok(Step::Navigate {
                hash: args.first().map(|s| (*s).to_owned()).unwrap_or_default(),
            })
        }
        other => Err(ScriptErrorKind::UnknownCommand(other.to_owned())),
    }
}

fn arg<'a>(
    args: &[&'a str],
    idx: usize,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ScriptErrorKind> {
    args.get(idx)
        .copied()
        .ok_or(ScriptErrorKind::MissingArgument { command, expected })
}

fn max_args(args: &[&str], max: usize, command: &'static str) -> Result<(), ScriptErrorKind> {
    if args.len() > max {
        return Err(ScriptErrorKind::TooManyArguments {
            command,
            max,
            got: args.len(),
        });
    }
    Ok(())
}

fn number(raw: &str) -> Result<usize, ScriptErrorKind> {
    raw.parse()
        .map_err(|_| ScriptErrorKind::InvalidNumber(raw.to_owned()))
}
