//! Final-score derivation
//!
//! Pure and total: every combination of inputs maps to a deterministic score
//! with no panics. Policy: the raw score is scaled by minutes played, then a
//! flat penalty applies per target beyond the first, floored and clamped at
//! zero.

/// Weighting applied to a round's raw score when the countdown expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorePolicy {
    /// Seconds of play the raw score is normalized against
    pub time_norm_secs: u32,
    /// Flat deduction per target beyond the first
    pub extra_target_penalty: u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            time_norm_secs: 60,
            extra_target_penalty: 50,
        }
    }
}

impl ScorePolicy {
    /// Derive the final score from a finished round.
    ///
    /// Longer rounds scale the raw score down proportionally (playing two
    /// minutes halves it), and every target beyond the first costs a flat
    /// penalty. A zero-duration round scores zero.
    pub fn final_score(&self, raw_score: u32, target_count: u32, duration_secs: u32) -> u32 {
        if duration_secs == 0 || self.time_norm_secs == 0 {
            return 0;
        }
        let minutes = f64::from(duration_secs) / f64::from(self.time_norm_secs);
        let scaled = f64::from(raw_score) / minutes;
        let penalty =
            f64::from(target_count.saturating_sub(1)) * f64::from(self.extra_target_penalty);
        let score = scaled - penalty;
        if score <= 0.0 { 0 } else { score.floor() as u32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_raw_scores_zero() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.final_score(0, 1, 60), 0);
        assert_eq!(policy.final_score(0, 5, 1), 0);
        assert_eq!(policy.final_score(0, 100, 100_000), 0);
    }

    #[test]
    fn test_one_minute_single_target_passes_through() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.final_score(100, 1, 60), 100);
        assert_eq!(policy.final_score(700, 1, 60), 700);
    }

    #[test]
    fn test_extra_targets_cost_fifty_each() {
        let policy = ScorePolicy::default();
        // 200 raw over one minute, two extra targets
        assert_eq!(policy.final_score(200, 3, 60), 100);
        assert_eq!(policy.final_score(200, 5, 60), 0);
    }

    #[test]
    fn test_longer_rounds_scale_down() {
        let policy = ScorePolicy::default();
        // Two minutes halves the raw score
        assert_eq!(policy.final_score(300, 1, 120), 150);
        // Half a minute doubles it
        assert_eq!(policy.final_score(300, 1, 30), 600);
    }

    #[test]
    fn test_fractional_results_floor() {
        let policy = ScorePolicy::default();
        // 100 / (90/60) = 66.66..
        assert_eq!(policy.final_score(100, 1, 90), 66);
    }

    #[test]
    fn test_zero_duration_is_total() {
        let policy = ScorePolicy::default();
        assert_eq!(policy.final_score(1000, 1, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_non_increasing_in_target_count(
            raw in 0u32..1_000_000,
            count in 1u32..100,
            duration in 1u32..36_000,
        ) {
            let policy = ScorePolicy::default();
            let with_more = policy.final_score(raw, count + 1, duration);
            let with_fewer = policy.final_score(raw, count, duration);
            prop_assert!(with_more <= with_fewer);
        }

        #[test]
        fn prop_non_decreasing_in_raw_score(
            raw in 0u32..1_000_000,
            count in 1u32..100,
            duration in 1u32..36_000,
        ) {
            let policy = ScorePolicy::default();
            prop_assert!(policy.final_score(raw + 100, count, duration)
                >= policy.final_score(raw, count, duration));
        }

        #[test]
        fn prop_total_for_any_input(raw: u32, count: u32, duration: u32) {
            // Must not panic, whatever the inputs
            let _ = ScorePolicy::default().final_score(raw, count, duration);
        }
    }
}
