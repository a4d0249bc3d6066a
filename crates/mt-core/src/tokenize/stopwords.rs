//! Default English stop-word list.

/// Common English words removed by the optional stop-word stage.
///
/// Kept sorted so membership checks can binary search.
pub const DEFAULT_STOP_WORDS: [&str; 30] = [
    "a", "about", "an", "are", "as", "at", "be", "by", "com", "for", "from", "how", "i", "in",
    "is", "it", "of", "on", "or", "that", "the", "this", "to", "was", "what", "when", "where",
    "who", "will", "with",
];

/// True if the (already lowercased) token is a stop word.
pub fn is_stop_word(token: &str) -> bool {
    DEFAULT_STOP_WORDS.binary_search(&token).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_sorted_for_binary_search() {
        let mut sorted = DEFAULT_STOP_WORDS;
        sorted.sort_unstable();
        assert_eq!(sorted, DEFAULT_STOP_WORDS);
    }

    #[test]
    fn membership() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("com"));
        assert!(!is_stop_word("free"));
        // Matching is exact; uppercase input is the caller's mistake.
        assert!(!is_stop_word("The"));
    }
}
