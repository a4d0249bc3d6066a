//! Binary cosine similarity over token sets.
//!
//! With every token weighted 0/1, the dot product of two messages equals
//! the size of the intersection of their token sets, and the vector length
//! is the square root of the set size. Similarity is therefore
//! `|A ∩ B| / (sqrt(|A|) * sqrt(|B|))`, in [0, 1].

use std::collections::HashSet;

/// Cosine similarity under binary term weights, from precomputed sizes.
///
/// Either set being empty makes the 0/0 case; it is defined as 0.0 rather
/// than left to produce NaN.
pub fn binary_cosine(intersection: usize, len_a: usize, len_b: usize) -> f64 {
    if len_a == 0 || len_b == 0 {
        return 0.0;
    }
    intersection as f64 / ((len_a as f64).sqrt() * (len_b as f64).sqrt())
}

/// Cosine similarity between two deduplicated token sets.
pub fn token_set_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    // Iterate the smaller set when counting the intersection.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|t| large.contains(*t)).count();
    binary_cosine(intersection, a.len(), b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn self_similarity_is_one() {
        let a = set(&["free", "money", "now"]);
        let out = token_set_similarity(&a, &a);
        assert!((out - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_sets_score_zero() {
        let a = set(&["alpha", "beta"]);
        let b = set(&["gamma", "delta"]);
        assert_eq!(token_set_similarity(&a, &b), 0.0);
    }

    #[test]
    fn empty_set_scores_zero_not_nan() {
        let empty = HashSet::new();
        let a = set(&["free"]);
        assert_eq!(token_set_similarity(&empty, &a), 0.0);
        assert_eq!(token_set_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn partial_overlap_literal_value() {
        // |A|=2, |B|=2, |A∩B|=1: 1 / (sqrt(2)*sqrt(2)) = 0.5
        let a = set(&["free", "offer"]);
        let b = set(&["free", "meeting"]);
        assert!((token_set_similarity(&a, &b) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn binary_cosine_uses_set_sizes_not_counts() {
        assert!((binary_cosine(2, 4, 9) - 2.0 / 6.0).abs() < 1e-12);
    }
}
