//! Cryptarithmetic puzzles on top of the CSP engine.
//!
//! A puzzle such as SEND + MORE = MONEY becomes one variable per distinct
//! letter, digit domains seeded from the leading-digit rules, and a single
//! [`WordSum`] constraint. Everything puzzle-specific lives here; the engine
//! in [`crate::csp`] knows nothing about words or digits.

mod constraint;
mod puzzle;

pub use constraint::{word_value, WordSum};
pub use puzzle::{output_path_for, Puzzle, MAX_LETTERS, MAX_WORD_LEN};
