//! Error types.
//!
//! Errors come in three layers, each wrapping the one below:
//!
//! - [`ValueError`]: raised by validators and type handlers while turning
//!   value tokens into a typed value. Knows nothing about files or keys.
//! - [`FieldError`]: raised while resolving an option key to a field and
//!   dispatching its values. Knows the field, not the file.
//! - [`ParseError`]: what [`parse`](crate::parse) returns. Every line-level
//!   failure is wrapped as [`ParseError::Field`] with the file path and line
//!   number, rendered as `"<path> line <N>: error parsing <key>: <cause>"`.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used for caller-supplied callbacks and plug-in handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(lineconf::io)))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} line {line}: first line can't be indented")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(lineconf::indented_first_line),
            help("continuation lines must follow an option line")
        )
    )]
    IndentedFirstLine { path: PathBuf, line: usize },

    #[error("{path} line {line}: indented line has no option to continue")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(lineconf::nothing_to_continue),
            help("the files sourced before this line set no options")
        )
    )]
    NothingToContinue { path: PathBuf, line: usize },

    #[error("{path} line {line}: cannot source {target}: it is already being read")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(lineconf::source_cycle)))]
    SourceCycle {
        path: PathBuf,
        line: usize,
        target: PathBuf,
    },

    #[error("{path} line {line}: error parsing {key}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(lineconf::field)))]
    Field {
        path: PathBuf,
        line: usize,
        key: String,
        source: FieldError,
    },
}

impl ParseError {
    /// Line number the error points at, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Io { .. } => None,
            ParseError::IndentedFirstLine { line, .. }
            | ParseError::NothingToContinue { line, .. }
            | ParseError::SourceCycle { line, .. }
            | ParseError::Field { line, .. } => Some(*line),
        }
    }
}

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown option {key} (field {} is missing)", .candidates.join(" or "))]
    UnknownOption { key: String, candidates: Vec<String> },

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("don't know how to set fields of the type {0}")]
    UnknownType(String),

    #[error("{0} (from handler)")]
    Handler(#[source] BoxError),

    #[error("the handler for {descriptor} returned a value of a different type")]
    TypeMismatch { descriptor: String },
}

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("must have no values (has: {has})")]
    NoValue { has: usize },

    #[error("must have exactly one value (has: {has})")]
    SingleValue { has: usize },

    #[error("must have more than {min} values (has: {has})")]
    TooFew { min: usize, has: usize },

    #[error("must have fewer than {max} values (has: {has})")]
    TooMany { max: usize, has: usize },

    #[error("unable to parse {0:?} as a boolean")]
    Bool(String),

    #[error("unable to parse {value:?} as a character")]
    Char { value: String },

    #[error(transparent)]
    Int(#[from] ParseIntError),

    #[error(transparent)]
    Float(#[from] ParseFloatError),

    #[error(transparent)]
    Custom(BoxError),
}

impl ValueError {
    /// Wrap any error raised by a plug-in handler.
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        ValueError::Custom(err.into())
    }
}
