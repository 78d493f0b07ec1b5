//! Constraint Satisfaction Problem (CSP) engine.
//!
//! A depth-first backtracking solver over variables with finite, ordered
//! domains and pluggable constraints, using the minimum-remaining-values
//! (MRV) heuristic for variable ordering.
//!
//! # Key Components
//!
//! - **Types**: [`Assignment`], the [`Constraint`] trait, and the
//!   [`Variable`] / [`Value`] bounds
//! - **Model**: [`Csp`]: variables, domains, per-variable constraint registry
//! - **Runner**: [`SearchRunner`]: the backtracking search itself
//! - **Config**: [`SearchConfig`], [`TieBreak`]
//! - **Constraints**: [`AllDifferent`] and the shared duplicate check
//!
//! # Design
//!
//! The model is immutable once constraints are registered. Assignments are
//! copied one binding at a time as the search descends, so sibling branches
//! never see each other's tentative bindings and backtracking needs no undo.
//! Only the newest binding is checked against its constraints; no domain
//! reduction (forward checking, AC-3) is performed.
//!
//! # References
//!
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! ch. 6, Constraint Satisfaction Problems.

mod config;
mod constraints;
mod model;
mod runner;
mod types;

pub use config::{SearchConfig, TieBreak};
pub use constraints::{has_duplicate_values, AllDifferent};
pub use model::Csp;
pub use runner::{SearchResult, SearchRunner, SearchStatus};
pub use types::{Assignment, Constraint, Value, Variable};
