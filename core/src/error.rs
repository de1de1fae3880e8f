//! Error types for option resolution.
//!
//! Every variant is fatal to the parse that produced it; there is no partial
//! result. Help and version requests are not errors, see
//! [`Outcome`](crate::Outcome).

use std::fmt;

use thiserror::Error;

use crate::types::ValueType;
use crate::validate::SchemaError;

/// Spelling of an unrecognized option token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Starts with `--`.
    Long,
    /// Starts with a single `-`.
    Short,
}

impl OptionKind {
    pub fn of(token: &str) -> Self {
        if token.starts_with("--") {
            OptionKind::Long
        } else {
            OptionKind::Short
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Long => f.write_str("option"),
            OptionKind::Short => f.write_str("flag"),
        }
    }
}

/// Errors raised while loading config overrides or resolving tokens.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Option-like token that matches no declared name.
    #[error("unknown {kind}: {token}{}", did_you_mean(.suggestions))]
    UnknownOption {
        token: String,
        kind: OptionKind,
        suggestions: Vec<String>,
    },

    /// Option given more than once.
    #[error("cannot repeat option {0} twice")]
    RepeatedOption(String),

    /// Value outside the option's closed set.
    #[error("{value} is not a choice for {option}; choices are: {}", .choices.join(", "))]
    InvalidChoice {
        option: String,
        value: String,
        choices: Vec<String>,
    },

    /// More comma-separated items than declared compound fields.
    #[error("too many arguments for {option}, starting with '{item}'")]
    CompoundTooManyValues { option: String, item: String },

    /// Required compound field left empty.
    #[error("parameter '{field}' is required for {option}")]
    CompoundMissingField { option: String, field: String },

    /// Malformed line or value literal in the config overlay.
    #[error("invalid config entry on line {line}: {text}")]
    ConfigParseError { line: usize, text: String },

    /// Single-value option at the end of the token list.
    #[error("option {0} needs a value")]
    MissingValue(String),

    /// Literal that does not coerce to the declared type.
    #[error("option {option} expects {expected}, got '{value}'")]
    InvalidValue {
        option: String,
        value: String,
        expected: ValueType,
    },

    /// Option table failed validation.
    #[error("invalid option schema: {0}")]
    InvalidSchema(#[from] SchemaError),

    /// Config file exists but could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {})", suggestions.join(", "))
    }
}

/// Convenience alias for results with [`ParserError`].
pub type Result<T> = std::result::Result<T, ParserError>;
