//! Assignments of words to variables, and the solutions built from them.

use crate::{crossword::Variable, dictionary::WordId};

/// A partial mapping from variables to words.
///
/// Variables are addressed by their index into
/// [`Puzzle::variables`](crate::Puzzle::variables) and words by their
/// [`WordId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    words: Vec<Option<WordId>>,
}

impl Assignment {
    /// Create an empty assignment for a puzzle with `num_variables`
    /// variables.
    pub fn new(num_variables: usize) -> Self {
        Assignment {
            words: vec![None; num_variables],
        }
    }

    /// Return the word assigned to `variable`, if any.
    pub fn get(&self, variable: usize) -> Option<WordId> {
        self.words.get(variable).copied().flatten()
    }

    /// Return true if `variable` has a word.
    pub fn contains(&self, variable: usize) -> bool {
        self.get(variable).is_some()
    }

    /// Assign `word` to `variable`, returning the previous word.
    ///
    /// # Panics
    ///
    /// Panics if `variable` is out of range.
    pub fn insert(&mut self, variable: usize, word: WordId) -> Option<WordId> {
        self.words[variable].replace(word)
    }

    /// Remove the word assigned to `variable`, returning it.
    pub fn remove(&mut self, variable: usize) -> Option<WordId> {
        self.words.get_mut(variable).and_then(Option::take)
    }

    /// Remove every word.
    pub fn clear(&mut self) {
        self.words.fill(None);
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.words.iter().flatten().count()
    }

    /// Return true if no variable is assigned.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(Option::is_none)
    }

    /// Return true if every variable is assigned.
    pub fn is_complete(&self) -> bool {
        self.words.iter().all(Option::is_some)
    }

    /// Iterate over the assigned `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, WordId)> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(variable, word)| word.map(|word| (variable, word)))
    }
}

/// A complete fill of a puzzle, borrowing from the puzzle and dictionary it
/// was found with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Solution<'p> {
    entries: Vec<(&'p Variable, &'p str)>,
}

impl<'p> Solution<'p> {
    pub(crate) fn new(entries: Vec<(&'p Variable, &'p str)>) -> Self {
        Solution { entries }
    }

    /// Return the word placed in `variable`.
    pub fn get(&self, variable: &Variable) -> Option<&'p str> {
        self.entries
            .iter()
            .find(|(other, _)| *other == variable)
            .map(|(_, word)| *word)
    }

    /// Iterate over `(variable, word)` pairs in the puzzle's variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p Variable, &'p str)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of filled variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the puzzle had no variables to fill.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
