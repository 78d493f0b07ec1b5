//! Search configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How MRV breaks ties between unassigned variables with equally small
/// domains.
///
/// Unassigned variables are always scanned in declaration order; the two
/// policies differ only in the comparison against the running minimum.
/// When a puzzle has several solutions the policy decides which one is
/// found first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TieBreak {
    /// Compare with `<=`: the last tied variable in declaration order wins.
    #[default]
    Last,
    /// Compare with `<`: the first tied variable in declaration order wins.
    First,
}

/// Configuration for [`SearchRunner`](super::SearchRunner).
///
/// # Examples
///
/// ```
/// use cryptarith::csp::{SearchConfig, TieBreak};
///
/// let config = SearchConfig::default()
///     .with_tie_break(TieBreak::First)
///     .with_max_nodes(1_000_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// MRV tie-break policy.
    pub tie_break: TieBreak,

    /// Maximum number of bindings to attempt. 0 = no limit.
    pub max_nodes: usize,

    /// Whether to explore the values of the first decision in parallel
    /// using rayon. Requires the `parallel` feature.
    ///
    /// The result is the same as a sequential run: the leftmost value whose
    /// subtree holds a solution wins.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            max_nodes: 0,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_max_nodes(mut self, n: usize) -> Self {
        self.max_nodes = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel && !cfg!(feature = "parallel") {
            return Err("parallel search requires the `parallel` feature".into());
        }
        Ok(())
    }
}
