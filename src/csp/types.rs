//! Core types for the CSP engine: variables, values, assignments and the
//! [`Constraint`] trait.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a decision variable.
///
/// Blanket-implemented for every type with the required bounds, so `char`,
/// `&'static str`, `usize` and `String` all work out of the box.
pub trait Variable: Clone + Eq + Hash + Debug + Send + Sync {}

impl<T: Clone + Eq + Hash + Debug + Send + Sync> Variable for T {}

/// A candidate value drawn from a variable's domain.
pub trait Value: Clone + PartialEq + Debug + Send + Sync {}

impl<T: Clone + PartialEq + Debug + Send + Sync> Value for T {}

/// A (possibly partial) mapping from variables to chosen values.
///
/// Search never mutates an assignment after handing it down a level.
/// Instead [`Assignment::extended`] produces a copy with one more binding,
/// and a failed branch simply drops its copy.
///
/// # Examples
///
/// ```
/// use cryptarith::csp::Assignment;
///
/// let empty: Assignment<char, u8> = Assignment::new();
/// let one = empty.extended('S', 9);
/// assert!(empty.is_empty());
/// assert_eq!(one.get(&'S'), Some(&9));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "V: Serialize, D: Serialize",
        deserialize = "V: Eq + Hash + Deserialize<'de>, D: Deserialize<'de>"
    ))
)]
pub struct Assignment<V, D> {
    bindings: HashMap<V, D>,
}

impl<V: Eq + Hash, D> Assignment<V, D> {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Value bound to `variable`, if any.
    pub fn get(&self, variable: &V) -> Option<&D> {
        self.bindings.get(variable)
    }

    /// Whether `variable` is bound.
    pub fn contains(&self, variable: &V) -> bool {
        self.bindings.contains_key(variable)
    }

    /// Iterates over the bindings in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, V, D> {
        self.bindings.iter()
    }

    /// Consumes the assignment, returning the underlying map.
    pub fn into_map(self) -> HashMap<V, D> {
        self.bindings
    }
}

impl<V: Eq + Hash + Clone, D: Clone> Assignment<V, D> {
    /// Returns a copy of this assignment with `variable` bound to `value`.
    ///
    /// An existing binding for `variable` is replaced in the copy; `self`
    /// is left untouched.
    pub fn extended(&self, variable: V, value: D) -> Self {
        let mut bindings = self.bindings.clone();
        bindings.insert(variable, value);
        Self { bindings }
    }
}

impl<V: Eq + Hash, D: PartialEq> PartialEq for Assignment<V, D> {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings
    }
}

impl<V: Eq + Hash, D: Eq> Eq for Assignment<V, D> {}

impl<V: Eq + Hash, D> Default for Assignment<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Eq + Hash, D> FromIterator<(V, D)> for Assignment<V, D> {
    fn from_iter<I: IntoIterator<Item = (V, D)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl<V: Eq + Hash, D> From<HashMap<V, D>> for Assignment<V, D> {
    fn from(bindings: HashMap<V, D>) -> Self {
        Self { bindings }
    }
}

impl<'a, V: Eq + Hash, D> IntoIterator for &'a Assignment<V, D> {
    type Item = (&'a V, &'a D);
    type IntoIter = hash_map::Iter<'a, V, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// A unit of domain knowledge over a fixed subset of variables.
///
/// The engine calls [`satisfied`](Constraint::satisfied) right after binding
/// one of [`variables`](Constraint::variables), so the assignment it sees is
/// usually partial. Implementations must:
///
/// - return `true` whenever the bound variables cannot yet be judged, so
///   that pruning never rejects an extendable assignment;
/// - have no side effects, so repeated calls on the same assignment agree.
///
/// # Examples
///
/// ```
/// use cryptarith::csp::{Assignment, Constraint};
///
/// /// `x < y` once both are bound.
/// struct LessThan(Vec<&'static str>);
///
/// impl Constraint<&'static str, i32> for LessThan {
///     fn variables(&self) -> &[&'static str] {
///         &self.0
///     }
///
///     fn satisfied(&self, a: &Assignment<&'static str, i32>) -> bool {
///         match (a.get(&self.0[0]), a.get(&self.0[1])) {
///             (Some(x), Some(y)) => x < y,
///             _ => true,
///         }
///     }
/// }
///
/// let c = LessThan(vec!["x", "y"]);
/// let partial: Assignment<_, _> = [("x", 3)].into_iter().collect();
/// assert!(c.satisfied(&partial));
/// assert!(!c.satisfied(&partial.extended("y", 1)));
/// ```
pub trait Constraint<V, D>: Send + Sync {
    /// Variables this constraint is about.
    fn variables(&self) -> &[V];

    /// Whether the current bindings do not violate this constraint.
    fn satisfied(&self, assignment: &Assignment<V, D>) -> bool;
}
