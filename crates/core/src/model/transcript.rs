//! Transcript normalization and matching.
//!
//! A transcript matches when its normalized form contains the normalized
//! expected word. Containment is intentional: "дома" matches "дом", and so
//! does a whole sentence that mentions the word.

/// Lowercases and trims a transcript or word for comparison.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Returns true if `heard` contains `expected` after normalizing both.
///
/// An expected word that normalizes to the empty string never matches.
#[must_use]
pub fn matches(heard: &str, expected: &str) -> bool {
    let expected = normalize(expected);
    if expected.is_empty() {
        return false;
    }
    normalize(heard).contains(&expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_containing_word_matches() {
        assert!(matches("я вижу дом", "дом"));
    }

    #[test]
    fn inflected_form_matches_by_containment() {
        assert!(matches("дома", "дом"));
    }

    #[test]
    fn matching_ignores_case_and_surrounding_whitespace() {
        assert!(matches("  Яблоко \n", "яблоко"));
        assert!(matches("вода", " ВОДА "));
    }

    #[test]
    fn unrelated_transcript_does_not_match() {
        assert!(!matches("яблоко", "дом"));
        assert!(!matches("", "дом"));
    }

    #[test]
    fn blank_expected_word_never_matches() {
        assert!(!matches("anything", "   "));
    }
}
