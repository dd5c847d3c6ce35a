//! Deterministic scoring from confidence and pattern complexity.
//!
//! The formulas below are the system contract. Earlier iterations of
//! the upstream application computed the overall rating several
//! different ways; exactly one formula is supported here and it is
//! total over its inputs.

use serde::{Deserialize, Serialize};

/// Weight of the confidence percentage in the overall rating.
const W_CONFIDENCE: f32 = 0.3;
/// Weight of the pattern complexity rank.
const W_COMPLEXITY: f32 = 0.3;
/// Weight of the execution score.
const W_EXECUTION: f32 = 0.4;

/// Derived scores for a positive analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// How well the pour was performed, 1-5, from confidence alone.
    pub execution_score: u8,
    /// Overall rating, 0-5.
    pub rating: f32,
}

/// Compute execution score and overall rating.
///
/// - `execution_score = clamp(round(confidence / 20), 1, 5)`
/// - `rating = clamp(round((confidence*0.3 + complexity*0.3 + execution*0.4) / 20), 0, 5)`
///
/// Pure and total for `confidence` in 0-100 and `pattern_complexity`
/// in 1-5; out-of-band inputs are clamped, never rejected.
pub fn compute_scores(pattern_complexity: u8, confidence: u8) -> Scores {
    let confidence = confidence.min(100);
    let execution_score = ((f32::from(confidence) / 20.0).round() as i64).clamp(1, 5) as u8;

    let weighted = f32::from(confidence) * W_CONFIDENCE
        + f32::from(pattern_complexity) * W_COMPLEXITY
        + f32::from(execution_score) * W_EXECUTION;
    let rating = ((weighted / 20.0).round() as i64).clamp(0, 5) as f32;

    Scores { execution_score, rating }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_score_band_edges() {
        assert_eq!(compute_scores(1, 0).execution_score, 1);
        assert_eq!(compute_scores(1, 9).execution_score, 1);
        assert_eq!(compute_scores(1, 30).execution_score, 2);
        assert_eq!(compute_scores(1, 80).execution_score, 4);
        assert_eq!(compute_scores(1, 100).execution_score, 5);
    }

    #[test]
    fn test_execution_score_always_in_band() {
        for confidence in 0..=100u8 {
            for complexity in 1..=5u8 {
                let scores = compute_scores(complexity, confidence);
                assert!((1..=5).contains(&scores.execution_score));
                assert!(scores.rating >= 0.0 && scores.rating <= 5.0);
            }
        }
    }

    #[test]
    fn test_rating_is_weighted_and_rounded() {
        // confidence 80, complexity 4 → execution 4
        // (80*0.3 + 4*0.3 + 4*0.4) / 20 = 26.8 / 20 = 1.34 → 1
        let scores = compute_scores(4, 80);
        assert_eq!(scores.execution_score, 4);
        assert_eq!(scores.rating, 1.0);
    }

    #[test]
    fn test_rating_peak_inputs() {
        // confidence 100, complexity 5 → execution 5
        // (30 + 1.5 + 2) / 20 = 1.675 → 2
        let scores = compute_scores(5, 100);
        assert_eq!(scores.execution_score, 5);
        assert_eq!(scores.rating, 2.0);
    }

    #[test]
    fn test_out_of_band_confidence_clamps() {
        let scores = compute_scores(5, 255);
        assert_eq!(scores.execution_score, 5);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(compute_scores(3, 57), compute_scores(3, 57));
    }
}
