//! Backtracking constraint satisfaction with a cryptarithm front end.
//!
//! - **CSP engine** ([`csp`]): variables with finite ordered domains,
//!   pluggable [`Constraint`](csp::Constraint)s, and depth-first
//!   backtracking search with minimum-remaining-values variable ordering.
//! - **Cryptarithms** ([`cryptarithm`]): letter-sum puzzles such as
//!   SEND + MORE = MONEY, expressed as a word-sum constraint plus seeded
//!   digit domains.
//!
//! # Architecture
//!
//! The engine is domain-agnostic and depends on nothing puzzle-specific.
//! Puzzle shape, digit domains and the arithmetic rule are all supplied by
//! the caller as configuration and constraint objects.
//!
//! # Features
//!
//! - `parallel`: explore the first decision level on the rayon pool.
//! - `serde`: `Serialize`/`Deserialize` for assignments, configs and puzzles.

pub mod cryptarithm;
pub mod csp;
pub mod error;
pub mod logging;
