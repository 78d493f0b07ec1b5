//! Error types for engine setup and puzzle input.
//!
//! Running out of candidates is not an error: a search that finds nothing
//! reports [`SearchStatus::NoSolution`](crate::csp::SearchStatus::NoSolution).
//! The types here cover the two ways a search can be set up wrongly.

use thiserror::Error;

/// Errors raised while assembling a [`Csp`](crate::csp::Csp).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CspError {
    #[error("variable {variable} has no domain")]
    MissingDomain { variable: String },

    #[error("variable {variable} is declared more than once")]
    DuplicateVariable { variable: String },

    #[error("constraint references unknown variable {variable}")]
    UnknownVariable { variable: String },
}

/// Errors raised while reading or shaping a cryptarithm.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("expected three lines (two addends and a sum), found {found}")]
    MissingLines { found: usize },

    #[error("word {index} is empty")]
    EmptyWord { index: usize },

    #[error("invalid character {ch:?} in word {word:?}")]
    InvalidCharacter { word: String, ch: char },

    #[error("unsupported puzzle shape: {reason}")]
    UnsupportedShape { reason: String },

    #[error("puzzle uses {count} distinct letters, at most 10 can map to decimal digits")]
    TooManyLetters { count: usize },

    #[error("letter {letter} has no digit in the assignment")]
    UnboundLetter { letter: char },

    #[error(transparent)]
    Csp(#[from] CspError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
