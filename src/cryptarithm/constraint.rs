//! The word-sum constraint: `first + second == result`, letters as digits.

use crate::csp::{has_duplicate_values, Assignment, Constraint};

/// Letters of two addend words and a result word must encode a correct
/// decimal sum, with no two letters sharing a digit.
///
/// Words are read most significant digit first, so the letter at position
/// `i` of a word of length `n` carries weight `10^(n - 1 - i)`.
///
/// Evaluation on an assignment:
///
/// 1. two bound letters holding the same digit → `false`;
/// 2. every letter bound → `first + second == result`;
/// 3. anything else → `true`, since a partial assignment cannot be judged.
///
/// # Examples
///
/// ```
/// use cryptarith::csp::{Assignment, Constraint};
/// use cryptarith::cryptarithm::WordSum;
///
/// let c = WordSum::new("AB", "AB", "CB");
/// let partial: Assignment<char, u8> = [('A', 1)].into_iter().collect();
/// assert!(c.satisfied(&partial));
///
/// // 10 + 10 == 20
/// let full = partial.extended('B', 0).extended('C', 2);
/// assert!(c.satisfied(&full));
/// ```
#[derive(Debug, Clone)]
pub struct WordSum {
    letters: Vec<char>,
    first: Vec<char>,
    second: Vec<char>,
    result: Vec<char>,
}

impl WordSum {
    /// Creates the constraint for `first + second = result`.
    ///
    /// Words are used exactly as given; callers normalise case.
    pub fn new(first: &str, second: &str, result: &str) -> Self {
        let first: Vec<char> = first.chars().collect();
        let second: Vec<char> = second.chars().collect();
        let result: Vec<char> = result.chars().collect();

        let mut letters = Vec::new();
        for &ch in first.iter().chain(&second).chain(&result) {
            if !letters.contains(&ch) {
                letters.push(ch);
            }
        }

        Self {
            letters,
            first,
            second,
            result,
        }
    }

    /// Distinct letters in order of first appearance.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Whether `assignment` binds every letter and the sum holds.
    pub fn holds(&self, assignment: &Assignment<char, u8>) -> bool {
        let values = (
            word_value(&self.first, assignment),
            word_value(&self.second, assignment),
            word_value(&self.result, assignment),
        );
        match values {
            (Some(a), Some(b), Some(sum)) => a.checked_add(b) == Some(sum),
            _ => false,
        }
    }
}

impl Constraint<char, u8> for WordSum {
    fn variables(&self) -> &[char] {
        &self.letters
    }

    fn satisfied(&self, assignment: &Assignment<char, u8>) -> bool {
        if has_duplicate_values(&self.letters, assignment) {
            return false;
        }
        if !self.letters.iter().all(|l| assignment.contains(l)) {
            return true;
        }
        self.holds(assignment)
    }
}

/// Decimal value of `word` under `assignment`.
///
/// `None` if a letter is unbound or the value overflows `u64`.
pub fn word_value(word: &[char], assignment: &Assignment<char, u8>) -> Option<u64> {
    word.iter().try_fold(0u64, |acc, letter| {
        let digit = *assignment.get(letter)?;
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn send_more_money() -> WordSum {
        WordSum::new("SEND", "MORE", "MONEY")
    }

    fn known_solution() -> Assignment<char, u8> {
        [
            ('O', 0),
            ('M', 1),
            ('Y', 2),
            ('E', 5),
            ('N', 6),
            ('D', 7),
            ('R', 8),
            ('S', 9),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_letters_in_first_appearance_order() {
        let c = send_more_money();
        assert_eq!(c.letters(), &['S', 'E', 'N', 'D', 'M', 'O', 'R', 'Y']);
        assert_eq!(c.variables(), c.letters());
    }

    #[test]
    fn test_word_value() {
        let a = known_solution();
        assert_eq!(word_value(&['S', 'E', 'N', 'D'], &a), Some(9567));
        assert_eq!(word_value(&['M', 'O', 'R', 'E'], &a), Some(1085));
        assert_eq!(word_value(&['M', 'O', 'N', 'E', 'Y'], &a), Some(10652));
        assert_eq!(word_value(&['Q'], &a), None);
        assert_eq!(word_value(&[], &a), Some(0));
    }

    #[test]
    fn test_word_value_overflow() {
        let a: Assignment<char, u8> = [('A', 9)].into_iter().collect();
        assert_eq!(word_value(&['A'; 20], &a), None);
    }

    #[test]
    fn test_known_solution_satisfies() {
        let c = send_more_money();
        assert!(c.satisfied(&known_solution()));
        assert!(c.holds(&known_solution()));
    }

    #[test]
    fn test_wrong_sum_rejected() {
        let c = send_more_money();
        // swap D and Y: still distinct, sum no longer holds
        let a = known_solution().extended('D', 2).extended('Y', 7);
        assert!(!c.satisfied(&a));
    }

    #[test]
    fn test_duplicate_digits_rejected_early() {
        let c = send_more_money();
        let a: Assignment<char, u8> = [('S', 9), ('E', 9)].into_iter().collect();
        assert!(!c.satisfied(&a));
    }

    #[test]
    fn test_partial_assignment_tolerated() {
        let c = send_more_money();
        assert!(c.satisfied(&Assignment::new()));

        let mut a = Assignment::new();
        for (letter, digit) in [('S', 9), ('E', 5), ('N', 6), ('D', 7), ('M', 1), ('O', 0), ('R', 8)] {
            a = a.extended(letter, digit);
            assert!(c.satisfied(&a), "partial assignment rejected at {letter}");
        }
        assert!(!c.holds(&a));
    }

    #[test]
    fn test_repeated_letters_across_words() {
        // 22 + 22 = 44
        let c = WordSum::new("AA", "AA", "BB");
        let ok: Assignment<char, u8> = [('A', 2), ('B', 4)].into_iter().collect();
        let bad: Assignment<char, u8> = [('A', 2), ('B', 5)].into_iter().collect();
        assert!(c.satisfied(&ok));
        assert!(!c.satisfied(&bad));
    }

    proptest! {
        #[test]
        fn prop_satisfied_is_idempotent(digits in proptest::collection::vec(0u8..10, 8)) {
            let c = send_more_money();
            let a: Assignment<char, u8> = c.letters().iter().copied().zip(digits).collect();
            let first = c.satisfied(&a);
            for _ in 0..3 {
                prop_assert_eq!(c.satisfied(&a), first);
            }
        }

        #[test]
        fn prop_distinct_partial_never_rejected(
            perm in Just((0u8..10).collect::<Vec<_>>()).prop_shuffle(),
            bound in 0usize..8,
        ) {
            // Fewer than all letters bound, all digits distinct: cannot be judged yet.
            let c = send_more_money();
            let a: Assignment<char, u8> = c
                .letters()
                .iter()
                .copied()
                .zip(perm)
                .take(bound)
                .collect();
            prop_assert!(c.satisfied(&a));
        }
    }
}
