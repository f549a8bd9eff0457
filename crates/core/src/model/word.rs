use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::transcript;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordListError {
    #[error("word list must contain at least one pair")]
    Empty,

    #[error("word pair {index} has a blank {field} word")]
    BlankWord { index: usize, field: &'static str },
}

/// A prompt word and the word the learner is expected to say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPair {
    /// Shown to the learner.
    pub foreign: String,
    /// Spoken by the learner.
    pub native: String,
}

impl WordPair {
    #[must_use]
    pub fn new(foreign: impl Into<String>, native: impl Into<String>) -> Self {
        Self {
            foreign: foreign.into(),
            native: native.into(),
        }
    }

    /// Returns true if `heard` contains this pair's native word.
    #[must_use]
    pub fn is_spoken_in(&self, heard: &str) -> bool {
        transcript::matches(heard, &self.native)
    }
}

/// Fixed, non-empty, ordered list of word pairs.
///
/// Presentation order is insertion order and wraps back to the first pair
/// after the last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    pairs: Vec<WordPair>,
}

impl WordList {
    /// # Errors
    ///
    /// Returns `WordListError::Empty` for an empty list.
    /// Returns `WordListError::BlankWord` if any foreign or native word is blank.
    pub fn new(pairs: Vec<WordPair>) -> Result<Self, WordListError> {
        if pairs.is_empty() {
            return Err(WordListError::Empty);
        }
        for (index, pair) in pairs.iter().enumerate() {
            if pair.foreign.trim().is_empty() {
                return Err(WordListError::BlankWord {
                    index,
                    field: "foreign",
                });
            }
            if pair.native.trim().is_empty() {
                return Err(WordListError::BlankWord {
                    index,
                    field: "native",
                });
            }
        }
        Ok(Self { pairs })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the pair at `index`, wrapping around the end of the list.
    #[must_use]
    pub fn get(&self, index: usize) -> &WordPair {
        &self.pairs[index % self.pairs.len()]
    }

    /// Index of the pair presented after `index`.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.pairs.len()
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            pairs: default_words(),
        }
    }
}

/// The built-in lesson: three English prompts with their Russian answers.
#[must_use]
pub fn default_words() -> Vec<WordPair> {
    vec![
        WordPair::new("apple", "яблоко"),
        WordPair::new("house", "дом"),
        WordPair::new("water", "вода"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_list() {
        assert_eq!(WordList::new(Vec::new()), Err(WordListError::Empty));
    }

    #[test]
    fn rejects_blank_native_word() {
        let err = WordList::new(vec![WordPair::new("cat", "кот"), WordPair::new("dog", "  ")])
            .unwrap_err();
        assert_eq!(
            err,
            WordListError::BlankWord {
                index: 1,
                field: "native"
            }
        );
    }

    #[test]
    fn next_index_wraps_to_first() {
        let words = WordList::default();
        assert_eq!(words.len(), 3);
        assert_eq!(words.next_index(0), 1);
        assert_eq!(words.next_index(2), 0);
        assert_eq!(words.get(3).foreign, "apple");
    }

    #[test]
    fn pair_matches_sentence_containing_native_word() {
        let house = WordPair::new("house", "дом");
        assert!(house.is_spoken_in("Я вижу ДОМ"));
        assert!(!house.is_spoken_in("вода"));
    }
}
