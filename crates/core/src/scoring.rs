//! Scoring module - classic line-clear table
//!
//! Points depend only on how many rows a single lock cleared. There are no
//! levels, combos, or drop bonuses.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with one lock.
///
/// Counts outside the table (more than four rows at once cannot happen with
/// the catalog's pieces) score nothing.
pub fn score_delta(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Add a delta to a running score without wrapping
pub fn accumulate(score: u32, delta: u32) -> u32 {
    score.saturating_add(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(score_delta(0), 0);
        assert_eq!(score_delta(1), 40);
        assert_eq!(score_delta(2), 100);
        assert_eq!(score_delta(3), 300);
        assert_eq!(score_delta(4), 1200);
    }

    #[test]
    fn test_out_of_table_scores_zero() {
        assert_eq!(score_delta(5), 0);
        assert_eq!(score_delta(20), 0);
        assert_eq!(score_delta(usize::MAX), 0);
    }

    #[test]
    fn test_accumulate() {
        let score = accumulate(accumulate(0, score_delta(1)), score_delta(2));
        assert_eq!(score, 140);
        assert_eq!(accumulate(u32::MAX - 10, 1200), u32::MAX);
    }
}
