//! CSP model: variables, domains and the constraint registry.

use super::config::{SearchConfig, TieBreak};
use super::runner::SearchRunner;
use super::types::{Assignment, Constraint, Value, Variable};
use crate::error::CspError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A constraint satisfaction problem.
///
/// Variables and their domains are fixed at construction. Constraints are
/// registered once during setup; during search the model is only read.
///
/// # Examples
///
/// ```
/// use cryptarith::csp::{AllDifferent, Csp};
/// use std::collections::HashMap;
///
/// let vars = vec!['A', 'B'];
/// let domains = HashMap::from([('A', vec![1, 2]), ('B', vec![1])]);
/// let mut csp = Csp::new(vars, domains).unwrap();
/// csp.add_constraint(AllDifferent::new(vec!['A', 'B'])).unwrap();
///
/// let solution = csp.search().unwrap();
/// assert_eq!(solution.get(&'A'), Some(&2));
/// assert_eq!(solution.get(&'B'), Some(&1));
/// ```
pub struct Csp<V, D> {
    variables: Vec<V>,
    domains: HashMap<V, Vec<D>>,
    constraints: HashMap<V, Vec<Arc<dyn Constraint<V, D>>>>,
    constraint_count: usize,
}

impl<V: Variable, D: Value> Csp<V, D> {
    /// Creates a model over `variables` (in declaration order) with the
    /// given domains.
    ///
    /// Fails if a variable is declared twice or has no domain entry.
    /// Domain entries for undeclared variables are ignored.
    pub fn new(variables: Vec<V>, mut domains: HashMap<V, Vec<D>>) -> Result<Self, CspError> {
        let mut seen = HashSet::with_capacity(variables.len());
        for var in &variables {
            if !seen.insert(var) {
                return Err(CspError::DuplicateVariable {
                    variable: format!("{var:?}"),
                });
            }
            if !domains.contains_key(var) {
                return Err(CspError::MissingDomain {
                    variable: format!("{var:?}"),
                });
            }
        }
        domains.retain(|var, _| seen.contains(var));

        let constraints = variables.iter().map(|v| (v.clone(), Vec::new())).collect();

        Ok(Self {
            variables,
            domains,
            constraints,
            constraint_count: 0,
        })
    }

    /// Registers a constraint under every variable it references.
    pub fn add_constraint<C>(&mut self, constraint: C) -> Result<(), CspError>
    where
        C: Constraint<V, D> + 'static,
    {
        self.add_shared_constraint(Arc::new(constraint))
    }

    /// Registers an already shared constraint.
    ///
    /// Nothing is registered if the constraint references an unknown
    /// variable. Registering the same constraint twice is allowed; it is
    /// then simply evaluated twice.
    pub fn add_shared_constraint(
        &mut self,
        constraint: Arc<dyn Constraint<V, D>>,
    ) -> Result<(), CspError> {
        if let Some(unknown) = constraint
            .variables()
            .iter()
            .find(|v| !self.constraints.contains_key(*v))
        {
            return Err(CspError::UnknownVariable {
                variable: format!("{unknown:?}"),
            });
        }

        for var in constraint.variables() {
            if let Some(registered) = self.constraints.get_mut(var) {
                registered.push(Arc::clone(&constraint));
            }
        }
        self.constraint_count += 1;
        Ok(())
    }

    /// Whether every constraint registered for `variable` is satisfied.
    pub fn is_consistent(&self, variable: &V, assignment: &Assignment<V, D>) -> bool {
        self.constraints_on(variable)
            .iter()
            .all(|c| c.satisfied(assignment))
    }

    /// Minimum-remaining-values selection.
    ///
    /// Scans unassigned variables in declaration order and keeps the one
    /// with the smallest domain, breaking ties per `tie_break`. Returns
    /// `None` once every variable is bound.
    pub fn select_unassigned_variable(
        &self,
        assignment: &Assignment<V, D>,
        tie_break: TieBreak,
    ) -> Option<&V> {
        let mut best: Option<(&V, usize)> = None;
        for var in &self.variables {
            if assignment.contains(var) {
                continue;
            }
            let size = self.domain(var).len();
            let better = match best {
                None => true,
                Some((_, min)) => match tie_break {
                    TieBreak::Last => size <= min,
                    TieBreak::First => size < min,
                },
            };
            if better {
                best = Some((var, size));
            }
        }
        best.map(|(var, _)| var)
    }

    /// Whether `assignment` binds every variable of the model.
    pub fn is_complete(&self, assignment: &Assignment<V, D>) -> bool {
        self.variables.iter().all(|v| assignment.contains(v))
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[V] {
        &self.variables
    }

    /// Candidate values of `variable`, in trial order. Empty for unknown
    /// variables.
    pub fn domain(&self, variable: &V) -> &[D] {
        self.domains.get(variable).map_or(&[], Vec::as_slice)
    }

    /// Constraints registered for `variable`, in registration order.
    pub fn constraints_on(&self, variable: &V) -> &[Arc<dyn Constraint<V, D>>] {
        self.constraints.get(variable).map_or(&[], Vec::as_slice)
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of registered constraints (each registration counts once).
    pub fn constraint_count(&self) -> usize {
        self.constraint_count
    }

    /// Runs a default backtracking search from the empty assignment.
    pub fn search(&self) -> Option<Assignment<V, D>> {
        self.search_from(Assignment::new())
    }

    /// Runs a default backtracking search extending `assignment`.
    pub fn search_from(&self, assignment: Assignment<V, D>) -> Option<Assignment<V, D>> {
        SearchRunner::run_from(self, &SearchConfig::default(), assignment).assignment
    }
}
