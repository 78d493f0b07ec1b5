//! Generic constraints that are useful across problem domains.

use super::types::{Assignment, Constraint, Value, Variable};

/// Whether two bound variables of `scope` currently hold equal values.
///
/// Unbound variables are skipped, so this never rejects a partial
/// assignment for what it has not chosen yet.
pub fn has_duplicate_values<V, D>(scope: &[V], assignment: &Assignment<V, D>) -> bool
where
    V: Variable,
    D: Value,
{
    let bound: Vec<&D> = scope.iter().filter_map(|v| assignment.get(v)).collect();
    bound
        .iter()
        .enumerate()
        .any(|(i, a)| bound[i + 1..].iter().any(|b| a == b))
}

/// All variables in scope take pairwise distinct values.
///
/// # Examples
///
/// ```
/// use cryptarith::csp::{AllDifferent, Assignment, Constraint};
///
/// let c = AllDifferent::new(vec!['A', 'B', 'C']);
/// let a: Assignment<char, u8> = [('A', 1), ('B', 2)].into_iter().collect();
/// assert!(c.satisfied(&a));
/// assert!(!c.satisfied(&a.extended('C', 2)));
/// ```
#[derive(Debug, Clone)]
pub struct AllDifferent<V> {
    scope: Vec<V>,
}

impl<V> AllDifferent<V> {
    /// Creates the constraint over `scope`.
    pub fn new(scope: Vec<V>) -> Self {
        Self { scope }
    }
}

impl<V: Variable, D: Value> Constraint<V, D> for AllDifferent<V> {
    fn variables(&self) -> &[V] {
        &self.scope
    }

    fn satisfied(&self, assignment: &Assignment<V, D>) -> bool {
        !has_duplicate_values(&self.scope, assignment)
    }
}
