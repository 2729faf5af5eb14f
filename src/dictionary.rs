//! The list of candidate words available to fill a grid.

use crate::Error;
use std::{fs, ops::Index, path::Path};

/// Stable identifier of a word inside a [`Dictionary`].
///
/// Words are stored sorted, so comparing two ids compares the words
/// lexicographically.
pub type WordId = usize;

/// A single dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    text: String,
    letters: Box<[char]>,
}

impl Word {
    fn new(text: String) -> Self {
        let letters = text.chars().collect();

        Word { text, letters }
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Return the letter at `index`, if the word is long enough.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }

    /// Number of letters in the word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Return true if the word has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// A normalized set of words.
///
/// Every word is trimmed and upper-cased, blank entries are dropped and
/// duplicates collapse into one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    /// Create a dictionary from a list of words.
    pub fn new<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        let mut texts: Vec<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();

        texts.sort_unstable();
        texts.dedup();

        Dictionary {
            words: texts.into_iter().map(Word::new).collect(),
        }
    }

    /// Create a dictionary from text holding one word per line.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Read a dictionary from a file holding one word per line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::parse(&text);
        log::debug!(
            "Loaded [{}] words from [{}].",
            dictionary.len(),
            path.display()
        );

        Ok(dictionary)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Return true if the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Return the word with the given id.
    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    /// Look up the id of a word. The lookup applies the same normalization
    /// as construction.
    pub fn id_of(&self, text: &str) -> Option<WordId> {
        let text = text.trim().to_uppercase();

        self.words
            .binary_search_by(|word| word.text.as_str().cmp(&text))
            .ok()
    }

    /// Iterate over `(id, word)` pairs in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> {
        self.words.iter().enumerate()
    }
}

impl Index<WordId> for Dictionary {
    type Output = Word;

    fn index(&self, id: WordId) -> &Self::Output {
        &self.words[id]
    }
}
