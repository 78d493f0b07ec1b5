//! Reading, seeding and writing back a two-addend cryptarithm.

use super::constraint::WordSum;
use crate::csp::{
    has_duplicate_values, Assignment, Csp, SearchConfig, SearchResult, SearchRunner,
};
use crate::error::PuzzleError;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest word accepted; keeps every word value within `u64`.
pub const MAX_WORD_LEN: usize = 18;

/// Most distinct letters a puzzle may use: one per decimal digit.
pub const MAX_LETTERS: usize = 10;

/// A puzzle `first + second = result` over uppercase letters.
///
/// The result must be exactly one letter longer than the longer addend:
/// the sum carries into a new leading digit, which is therefore 1.
///
/// # Examples
///
/// ```
/// use cryptarith::cryptarithm::Puzzle;
/// use cryptarith::csp::SearchConfig;
///
/// let puzzle: Puzzle = "send\nmore\nmoney\n".parse().unwrap();
/// let result = puzzle.solve(&SearchConfig::default()).unwrap();
/// let solution = result.assignment.unwrap();
///
/// assert_eq!(puzzle.render(&solution).unwrap(), ["9567", "1085", "10652"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Puzzle {
    first: String,
    second: String,
    result: String,
}

impl Puzzle {
    /// Validates and normalises the three words.
    pub fn new(first: &str, second: &str, result: &str) -> Result<Self, PuzzleError> {
        let words = [first, second, result].map(|w| w.trim().to_uppercase());

        for (index, word) in words.iter().enumerate() {
            if word.is_empty() {
                return Err(PuzzleError::EmptyWord { index });
            }
            if let Some(ch) = word.chars().find(|c| !c.is_ascii_alphabetic()) {
                return Err(PuzzleError::InvalidCharacter {
                    word: word.clone(),
                    ch,
                });
            }
            if word.len() > MAX_WORD_LEN {
                return Err(PuzzleError::UnsupportedShape {
                    reason: format!("{word} is longer than {MAX_WORD_LEN} letters"),
                });
            }
        }

        let longest_addend = words[0].len().max(words[1].len());
        if words[2].len() != longest_addend + 1 {
            return Err(PuzzleError::UnsupportedShape {
                reason: format!(
                    "sum {} must be one letter longer than the longest addend ({longest_addend})",
                    words[2]
                ),
            });
        }

        let [first, second, result] = words;
        let puzzle = Self {
            first,
            second,
            result,
        };

        let count = puzzle.letters().len();
        if count > MAX_LETTERS {
            return Err(PuzzleError::TooManyLetters { count });
        }
        Ok(puzzle)
    }

    /// Parses the first three lines of `text`: first addend, second addend,
    /// sum. Anything after the third line is ignored.
    pub fn parse(text: &str) -> Result<Self, PuzzleError> {
        let lines: Vec<&str> = text.lines().take(3).collect();
        match lines.as_slice() {
            [first, second, result] => Self::new(first, second, result),
            _ => Err(PuzzleError::MissingLines { found: lines.len() }),
        }
    }

    /// Reads and parses a puzzle file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The three words in order: first addend, second addend, sum.
    pub fn words(&self) -> [&str; 3] {
        [
            self.first.as_str(),
            self.second.as_str(),
            self.result.as_str(),
        ]
    }

    /// Distinct letters in order of first appearance.
    pub fn letters(&self) -> Vec<char> {
        let mut letters = Vec::new();
        for ch in self.words().iter().flat_map(|w| w.chars()) {
            if !letters.contains(&ch) {
                letters.push(ch);
            }
        }
        letters
    }

    /// Initial digit domains.
    ///
    /// Every letter starts with 0–9. Leading letters of the addends cannot
    /// be 0, and the leading letter of the sum is the carry, so it is 1.
    /// The sum rule is applied last and wins when letters overlap.
    pub fn seed_domains(&self) -> HashMap<char, Vec<u8>> {
        let mut domains: HashMap<char, Vec<u8>> =
            self.letters().into_iter().map(|l| (l, (0..=9).collect())).collect();

        for word in [&self.first, &self.second] {
            if let Some(lead) = word.chars().next() {
                domains.insert(lead, (1..=9).collect());
            }
        }
        if let Some(lead) = self.result.chars().next() {
            domains.insert(lead, vec![1]);
        }
        domains
    }

    /// The word-sum constraint for this puzzle.
    pub fn constraint(&self) -> WordSum {
        WordSum::new(&self.first, &self.second, &self.result)
    }

    /// Builds the CSP: one variable per letter with seeded domains and a
    /// single [`WordSum`] constraint.
    pub fn build_csp(&self) -> Result<Csp<char, u8>, PuzzleError> {
        let mut csp = Csp::new(self.letters(), self.seed_domains())?;
        csp.add_constraint(self.constraint())?;
        Ok(csp)
    }

    /// Builds the CSP and searches it.
    pub fn solve(&self, config: &SearchConfig) -> Result<SearchResult<char, u8>, PuzzleError> {
        let csp = self.build_csp()?;
        log::debug!("solving {self} ({} letters)", csp.variable_count());
        Ok(SearchRunner::run(&csp, config))
    }

    /// Digit strings of the three words, in word order.
    ///
    /// `None` if some letter is unbound.
    pub fn render(&self, assignment: &Assignment<char, u8>) -> Option<[String; 3]> {
        let render_word = |word: &str| -> Option<String> {
            word.chars()
                .map(|l| assignment.get(&l).map(|&d| digit_char(d)))
                .collect()
        };
        Some([
            render_word(&self.first)?,
            render_word(&self.second)?,
            render_word(&self.result)?,
        ])
    }

    /// Whether `assignment` is a solution: distinct digits per letter and
    /// a correct sum.
    pub fn verify(&self, assignment: &Assignment<char, u8>) -> bool {
        !has_duplicate_values(&self.letters(), assignment) && self.constraint().holds(assignment)
    }

    /// Writes the rendered words to `path`, one per line.
    pub fn write_solution(
        &self,
        path: impl AsRef<Path>,
        assignment: &Assignment<char, u8>,
    ) -> Result<(), PuzzleError> {
        let mut out = String::new();
        for word in self.words() {
            for letter in word.chars() {
                let &digit = assignment
                    .get(&letter)
                    .ok_or(PuzzleError::UnboundLetter { letter })?;
                out.push(digit_char(digit));
            }
            out.push('\n');
        }
        fs::write(path, out)?;
        Ok(())
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {} = {}", self.first, self.second, self.result)
    }
}

fn digit_char(digit: u8) -> char {
    char::from_digit(u32::from(digit), 10).unwrap_or('?')
}

/// Output path for an input file: `<dir>/<stem> Output.txt`.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem} Output.txt"))
}
