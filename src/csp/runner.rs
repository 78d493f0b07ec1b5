//! Backtracking search execution.

use super::config::SearchConfig;
use super::model::Csp;
use super::types::{Assignment, Value, Variable};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a search run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchStatus {
    /// A complete consistent assignment was found.
    Solved,
    /// Every branch was explored without success.
    NoSolution,
    /// Stopped by the cancellation flag.
    Cancelled,
    /// Stopped after `max_nodes` bindings.
    NodeLimit,
    /// The configuration failed validation; nothing was searched.
    ConfigInvalid,
}

/// Result of a backtracking search run.
#[derive(Debug, Clone)]
pub struct SearchResult<V, D> {
    /// The complete assignment, when `status` is [`SearchStatus::Solved`].
    pub assignment: Option<Assignment<V, D>>,

    /// How the run ended.
    pub status: SearchStatus,

    /// Number of bindings attempted (consistent or not).
    pub nodes: usize,

    /// Number of consistent bindings whose subtree held no solution.
    pub backtracks: usize,

    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl<V, D> SearchResult<V, D> {
    fn empty(status: SearchStatus) -> Self {
        Self {
            assignment: None,
            status,
            nodes: 0,
            backtracks: 0,
            elapsed_ms: 0,
        }
    }

    /// Whether a solution was found.
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// Executes depth-first backtracking search over a [`Csp`].
///
/// At each level the runner:
///
/// 1. returns the assignment if it binds every variable;
/// 2. picks the unassigned variable with the fewest candidates (MRV);
/// 3. tries that variable's values in domain order, binding each into a
///    fresh copy of the assignment;
/// 4. recurses on copies that pass [`Csp::is_consistent`] and returns the
///    first success;
/// 5. reports failure once the values are exhausted, so the caller moves
///    on to its own next value.
///
/// Only the newest binding is checked. Unassigned domains are never pruned.
///
/// # Usage
///
/// ```ignore
/// let config = SearchConfig::default().with_max_nodes(1_000_000);
/// let result = SearchRunner::run(&csp, &config);
/// if let Some(solution) = result.assignment { /* ... */ }
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Searches from the empty assignment.
    pub fn run<V: Variable, D: Value>(
        csp: &Csp<V, D>,
        config: &SearchConfig,
    ) -> SearchResult<V, D> {
        Self::run_with_cancel(csp, config, Assignment::new(), None)
    }

    /// Searches for a completion of `assignment`.
    ///
    /// The initial bindings are trusted as given and are not checked
    /// against the constraints.
    pub fn run_from<V: Variable, D: Value>(
        csp: &Csp<V, D>,
        config: &SearchConfig,
        assignment: Assignment<V, D>,
    ) -> SearchResult<V, D> {
        Self::run_with_cancel(csp, config, assignment, None)
    }

    /// Searches with an optional cancellation token.
    ///
    /// The flag is polled before every binding; once it reads `true` the
    /// run unwinds and reports [`SearchStatus::Cancelled`].
    pub fn run_with_cancel<V: Variable, D: Value>(
        csp: &Csp<V, D>,
        config: &SearchConfig,
        assignment: Assignment<V, D>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> SearchResult<V, D> {
        if let Err(reason) = config.validate() {
            log::warn!("search not started: {reason}");
            return SearchResult::empty(SearchStatus::ConfigInvalid);
        }

        let start_time = Instant::now();
        log::debug!(
            "search started: {} variables, {} constraints, {} pre-bound",
            csp.variable_count(),
            csp.constraint_count(),
            assignment.len()
        );

        let search = Search {
            csp,
            config,
            cancel: cancel.as_deref(),
            nodes: AtomicUsize::new(0),
            backtracks: AtomicUsize::new(0),
        };

        let outcome = if config.parallel {
            search.backtrack_parallel(assignment)
        } else {
            search.backtrack(assignment)
        };

        let (assignment, status) = match outcome {
            Outcome::Found(solution) => (Some(solution), SearchStatus::Solved),
            Outcome::Failed => (None, SearchStatus::NoSolution),
            Outcome::Stopped(status) => (None, status),
        };

        let result = SearchResult {
            assignment,
            status,
            nodes: search.nodes.load(Ordering::Relaxed),
            backtracks: search.backtracks.load(Ordering::Relaxed),
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };
        log::debug!(
            "search finished: {:?} after {} nodes, {} backtracks, {} ms",
            result.status,
            result.nodes,
            result.backtracks,
            result.elapsed_ms
        );
        result
    }
}

enum Outcome<V, D> {
    Found(Assignment<V, D>),
    Failed,
    Stopped(SearchStatus),
}

/// Per-run search state. Only counters change; the model is read-only.
struct Search<'a, V, D> {
    csp: &'a Csp<V, D>,
    config: &'a SearchConfig,
    cancel: Option<&'a AtomicBool>,
    nodes: AtomicUsize,
    backtracks: AtomicUsize,
}

impl<V: Variable, D: Value> Search<'_, V, D> {
    fn backtrack(&self, assignment: Assignment<V, D>) -> Outcome<V, D> {
        let Some(variable) = self
            .csp
            .select_unassigned_variable(&assignment, self.config.tie_break)
        else {
            return Outcome::Found(assignment);
        };

        for value in self.csp.domain(variable) {
            match self.try_value(&assignment, variable, value) {
                Outcome::Failed => continue,
                done => return done,
            }
        }
        Outcome::Failed
    }

    /// Binds `variable = value` in a copy of `assignment` and searches the
    /// subtree below it.
    fn try_value(&self, assignment: &Assignment<V, D>, variable: &V, value: &D) -> Outcome<V, D> {
        if let Some(status) = self.stop_reason() {
            return Outcome::Stopped(status);
        }
        self.nodes.fetch_add(1, Ordering::Relaxed);

        let candidate = assignment.extended(variable.clone(), value.clone());
        if !self.csp.is_consistent(variable, &candidate) {
            log::trace!("{variable:?} = {value:?} rejected at depth {}", assignment.len());
            return Outcome::Failed;
        }
        log::trace!("{variable:?} = {value:?} at depth {}", assignment.len());

        let outcome = self.backtrack(candidate);
        if matches!(outcome, Outcome::Failed) {
            self.backtracks.fetch_add(1, Ordering::Relaxed);
        }
        outcome
    }

    /// Explores the values of the first decision on the rayon pool.
    ///
    /// `find_map_first` keeps the leftmost success, which is the same
    /// branch a sequential run would return.
    #[cfg(feature = "parallel")]
    fn backtrack_parallel(&self, assignment: Assignment<V, D>) -> Outcome<V, D> {
        use rayon::prelude::*;

        let Some(variable) = self
            .csp
            .select_unassigned_variable(&assignment, self.config.tie_break)
        else {
            return Outcome::Found(assignment);
        };

        self.csp
            .domain(variable)
            .par_iter()
            .find_map_first(|value| match self.try_value(&assignment, variable, value) {
                Outcome::Failed => None,
                done => Some(done),
            })
            .unwrap_or(Outcome::Failed)
    }

    #[cfg(not(feature = "parallel"))]
    fn backtrack_parallel(&self, assignment: Assignment<V, D>) -> Outcome<V, D> {
        self.backtrack(assignment)
    }

    fn stop_reason(&self) -> Option<SearchStatus> {
        if self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Some(SearchStatus::Cancelled);
        }
        if self.config.max_nodes > 0 && self.nodes.load(Ordering::Relaxed) >= self.config.max_nodes
        {
            return Some(SearchStatus::NodeLimit);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{AllDifferent, Constraint, TieBreak};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn csp_with(domains: &[(char, Vec<u8>)]) -> Csp<char, u8> {
        let vars = domains.iter().map(|(v, _)| *v).collect();
        Csp::new(vars, domains.iter().cloned().collect()).unwrap()
    }

    fn all_different(domains: &[(char, Vec<u8>)]) -> Csp<char, u8> {
        let mut csp = csp_with(domains);
        let scope = domains.iter().map(|(v, _)| *v).collect();
        csp.add_constraint(AllDifferent::new(scope)).unwrap();
        csp
    }

    /// Records every assignment it is asked about, always satisfied.
    struct Recorder {
        scope: Vec<char>,
        seen: Mutex<Vec<Vec<(char, u8)>>>,
    }

    impl Recorder {
        fn new(scope: Vec<char>) -> Self {
            Self {
                scope,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Constraint<char, u8> for Recorder {
        fn variables(&self) -> &[char] {
            &self.scope
        }

        fn satisfied(&self, assignment: &Assignment<char, u8>) -> bool {
            let mut bindings: Vec<(char, u8)> =
                assignment.iter().map(|(k, v)| (*k, *v)).collect();
            bindings.sort_unstable();
            self.seen.lock().unwrap().push(bindings);
            true
        }
    }

    /// Satisfied only once every variable in scope sums to `target`.
    struct SumTo {
        scope: Vec<char>,
        target: u32,
    }

    impl Constraint<char, u8> for SumTo {
        fn variables(&self) -> &[char] {
            &self.scope
        }

        fn satisfied(&self, assignment: &Assignment<char, u8>) -> bool {
            let values: Option<Vec<u8>> =
                self.scope.iter().map(|v| assignment.get(v).copied()).collect();
            match values {
                Some(values) => values.iter().map(|&d| u32::from(d)).sum::<u32>() == self.target,
                None => true,
            }
        }
    }

    #[test]
    fn test_solves_all_different() {
        let csp = all_different(&[('A', vec![1, 2, 3]), ('B', vec![1, 2]), ('C', vec![1])]);
        let result = SearchRunner::run(&csp, &SearchConfig::default());

        assert!(result.is_solved());
        let a = result.assignment.unwrap();
        assert_eq!(a.get(&'C'), Some(&1));
        assert_eq!(a.get(&'B'), Some(&2));
        assert_eq!(a.get(&'A'), Some(&3));
    }

    #[test]
    fn test_no_solution() {
        let csp = all_different(&[('A', vec![4]), ('B', vec![4])]);
        let result = SearchRunner::run(&csp, &SearchConfig::default());

        assert_eq!(result.status, SearchStatus::NoSolution);
        assert!(result.assignment.is_none());
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_no_variables_is_trivially_solved() {
        let csp: Csp<char, u8> = Csp::new(Vec::new(), HashMap::new()).unwrap();
        let result = SearchRunner::run(&csp, &SearchConfig::default());

        assert!(result.is_solved());
        assert!(result.assignment.unwrap().is_empty());
        assert_eq!(result.nodes, 0);
    }

    #[test]
    fn test_value_order_is_domain_order() {
        let csp = csp_with(&[('A', vec![7, 3, 5])]);
        let a = csp.search().unwrap();
        assert_eq!(a.get(&'A'), Some(&7));
    }

    #[test]
    fn test_tie_break_selects_solution() {
        // Two equal-size domains, no constraints: whichever variable is
        // chosen first takes its first value, then the other takes its own.
        // With `Last` B is branched on first; with `First` A is.
        let mut csp = csp_with(&[('A', vec![1, 2]), ('B', vec![1, 2])]);
        csp.add_constraint(AllDifferent::new(vec!['A', 'B'])).unwrap();

        let last = SearchRunner::run(&csp, &SearchConfig::default().with_tie_break(TieBreak::Last));
        let last = last.assignment.unwrap();
        assert_eq!((last.get(&'A'), last.get(&'B')), (Some(&2), Some(&1)));

        let first = SearchRunner::run(&csp, &SearchConfig::default().with_tie_break(TieBreak::First));
        let first = first.assignment.unwrap();
        assert_eq!((first.get(&'A'), first.get(&'B')), (Some(&1), Some(&2)));
    }

    #[test]
    fn test_exploration_order_deterministic() {
        let trace = || {
            let mut csp = csp_with(&[('X', vec![0, 1, 2]), ('Y', vec![0, 1, 2]), ('Z', vec![0, 1, 2])]);
            let recorder = Arc::new(Recorder::new(vec!['X', 'Y', 'Z']));
            csp.add_shared_constraint(recorder.clone()).unwrap();
            csp.add_constraint(SumTo {
                scope: vec!['X', 'Y', 'Z'],
                target: 5,
            })
            .unwrap();
            let result = SearchRunner::run(&csp, &SearchConfig::default());
            let seen = recorder.seen.lock().unwrap().clone();
            (result.assignment, seen)
        };

        let (first_solution, first_trace) = trace();
        for _ in 0..5 {
            let (solution, seen) = trace();
            assert_eq!(solution, first_solution);
            assert_eq!(seen, first_trace);
        }

        // All three domains tie, so `Last` branches on Z first.
        assert_eq!(first_trace[0], vec![('Z', 0)]);
    }

    #[test]
    fn test_backtracking_counts() {
        // X is tried at 0 and 1 before 2 makes the sum reachable.
        let mut csp = csp_with(&[('X', vec![0, 1, 2]), ('Y', vec![0, 1, 2, 3])]);
        csp.add_constraint(SumTo {
            scope: vec!['X', 'Y'],
            target: 5,
        })
        .unwrap();
        let result = SearchRunner::run(&csp, &SearchConfig::default());

        let a = result.assignment.unwrap();
        assert_eq!((a.get(&'X'), a.get(&'Y')), (Some(&2), Some(&3)));
        assert_eq!(result.backtracks, 2);
        // three X bindings, each followed by a full sweep of Y
        assert_eq!(result.nodes, 3 + 4 * 3);
    }

    #[test]
    fn test_run_from_partial() {
        let csp = all_different(&[('A', vec![1, 2, 3]), ('B', vec![1, 2, 3])]);
        let start: Assignment<char, u8> = [('B', 1)].into_iter().collect();
        let result = SearchRunner::run_from(&csp, &SearchConfig::default(), start);

        let a = result.assignment.unwrap();
        assert_eq!(a.get(&'B'), Some(&1));
        assert_eq!(a.get(&'A'), Some(&2));
    }

    #[test]
    fn test_node_limit() {
        let csp = all_different(&[
            ('A', vec![0, 1, 2, 3]),
            ('B', vec![0, 1, 2, 3]),
            ('C', vec![0, 1, 2, 3]),
            ('D', vec![0, 1, 2, 3]),
            ('E', vec![0, 1, 2, 3]),
        ]);
        let result = SearchRunner::run(&csp, &SearchConfig::default().with_max_nodes(10));

        assert_eq!(result.status, SearchStatus::NodeLimit);
        assert!(result.assignment.is_none());
        assert_eq!(result.nodes, 10);
    }

    #[test]
    fn test_cancellation() {
        let csp = all_different(&[('A', vec![0, 1]), ('B', vec![0, 1])]);

        // Set before running so cancellation is deterministic.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SearchRunner::run_with_cancel(
            &csp,
            &SearchConfig::default(),
            Assignment::new(),
            Some(cancel),
        );

        assert_eq!(result.status, SearchStatus::Cancelled);
        assert_eq!(result.nodes, 0);
    }

    #[cfg(not(feature = "parallel"))]
    #[test]
    fn test_invalid_config() {
        let csp = all_different(&[('A', vec![0])]);
        let result = SearchRunner::run(&csp, &SearchConfig::default().with_parallel(true));

        assert_eq!(result.status, SearchStatus::ConfigInvalid);
        assert!(!result.is_solved());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut csp = csp_with(&[('X', vec![0, 1, 2, 3]), ('Y', vec![0, 1, 2, 3]), ('Z', vec![0, 1, 2, 3])]);
        csp.add_constraint(SumTo {
            scope: vec!['X', 'Y', 'Z'],
            target: 7,
        })
        .unwrap();
        csp.add_constraint(AllDifferent::new(vec!['X', 'Y', 'Z'])).unwrap();

        let sequential = SearchRunner::run(&csp, &SearchConfig::default());
        let parallel = SearchRunner::run(&csp, &SearchConfig::default().with_parallel(true));

        assert!(parallel.is_solved());
        assert_eq!(parallel.assignment, sequential.assignment);
    }
}
