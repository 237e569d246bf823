//! Composite "true difficulty" score.
//!
//! ```text
//! score = base(tier)
//!       + (1 - acceptance_rate)                              * acceptance_impact
//!       + (1 - ln(1 + accepted)  / ln(1 + max_accepted))     * low_solve_penalty
//!       +      ln(1 + submitted) / ln(1 + max_submitted)     * popularity_discount
//!       +      clamp(id / max_id, 0, 1)                      * newness_premium
//! ```
//!
//! Counts are compressed with `ln(1 + x)` before normalizing against the
//! corpus maxima. The result is rounded to two decimals.

use crate::error::ConfigError;
use crate::models::{CorpusStats, Difficulty, Problem, ScoredProblem};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub easy_base: f64,
    pub medium_base: f64,
    pub hard_base: f64,
    /// Applied to `1 - acceptance_rate`. Must be positive.
    pub acceptance_impact: f64,
    /// Applied to `1 - log_norm(accepted)`. Must be positive.
    pub low_solve_penalty: f64,
    /// Applied to `log_norm(submitted)`. Must be negative.
    pub popularity_discount: f64,
    /// Applied to `id / max_id`. Must be positive.
    pub newness_premium: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            easy_base: 80.0,
            medium_base: 200.0,
            hard_base: 450.0,
            acceptance_impact: 300.0,
            low_solve_penalty: 150.0,
            popularity_discount: -80.0,
            newness_premium: 70.0,
        }
    }
}

impl ScoringWeights {
    pub fn base_score(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Easy => self.easy_base,
            Difficulty::Medium => self.medium_base,
            Difficulty::Hard => self.hard_base,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            self.easy_base,
            self.medium_base,
            self.hard_base,
            self.acceptance_impact,
            self.low_solve_penalty,
            self.popularity_discount,
            self.newness_premium,
        ];
        if all.iter().any(|w| !w.is_finite()) {
            return Err(ConfigError::Invalid("scoring weights must be finite".into()));
        }
        if self.acceptance_impact <= 0.0 {
            return Err(ConfigError::Invalid("acceptance_impact must be > 0".into()));
        }
        if self.low_solve_penalty <= 0.0 {
            return Err(ConfigError::Invalid("low_solve_penalty must be > 0".into()));
        }
        if self.popularity_discount >= 0.0 {
            return Err(ConfigError::Invalid("popularity_discount must be < 0".into()));
        }
        if self.newness_premium <= 0.0 {
            return Err(ConfigError::Invalid("newness_premium must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub acceptance: f64,
    pub low_solve: f64,
    pub popularity: f64,
    pub newness: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        round2(self.base + self.acceptance + self.low_solve + self.popularity + self.newness)
    }
}

pub fn breakdown(problem: &Problem, stats: &CorpusStats, weights: &ScoringWeights) -> ScoreBreakdown {
    let base = weights.base_score(problem.difficulty);

    let acceptance = (1.0 - problem.acceptance_rate) * weights.acceptance_impact;

    let low_solve = if stats.max_accepted > 0 {
        let norm = log_norm(problem.total_accepted, stats.max_accepted);
        (1.0 - norm) * weights.low_solve_penalty
    } else {
        0.0
    };

    let popularity = if stats.max_submitted > 0 {
        log_norm(problem.total_submitted, stats.max_submitted) * weights.popularity_discount
    } else {
        0.0
    };

    let newness = if stats.max_id > 0 {
        let norm = (problem.id as f64 / stats.max_id as f64).clamp(0.0, 1.0);
        norm * weights.newness_premium
    } else {
        0.0
    };

    ScoreBreakdown {
        base,
        acceptance,
        low_solve,
        popularity,
        newness,
    }
}

pub fn score(problem: &Problem, stats: &CorpusStats, weights: &ScoringWeights) -> f64 {
    breakdown(problem, stats, weights).total()
}

pub fn score_all(
    problems: Vec<Problem>,
    stats: &CorpusStats,
    weights: &ScoringWeights,
) -> Vec<ScoredProblem> {
    problems
        .into_iter()
        .map(|problem| {
            let score = score(&problem, stats, weights);
            ScoredProblem { problem, score }
        })
        .collect()
}

/// `ln(1 + value) / ln(1 + max)`; `max` must be at least 1.
fn log_norm(value: u64, max: u64) -> f64 {
    (value as f64).ln_1p() / (max as f64).ln_1p()
}

// Goes through decimal formatting so halves are judged on the exact binary
// value: 2.675 is stored just below the tie and rounds to 2.67.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: u64, difficulty: Difficulty, accepted: u64, submitted: u64) -> Problem {
        Problem::new(id, format!("P{}", id), format!("p-{}", id), difficulty, accepted, submitted)
    }

    fn big_stats() -> CorpusStats {
        CorpusStats::new(3000, 2_000_000, 1_000_000)
    }

    #[test]
    fn test_reference_example() {
        let p = problem(2900, Difficulty::Hard, 500, 5000);
        assert!((p.acceptance_rate - 0.10).abs() < 1e-12);

        let expected = 450.0
            + 0.9 * 300.0
            + (1.0 - 501f64.ln() / 1_000_001f64.ln()) * 150.0
            + (5001f64.ln() / 2_000_001f64.ln()) * -80.0
            + (2900.0 / 3000.0) * 70.0;
        let actual = score(&p, &big_stats(), &ScoringWeights::default());

        assert!((actual - expected).abs() <= 0.005 + 1e-9);
        assert_eq!(actual, 823.21);
    }

    #[test]
    fn test_score_has_two_decimals() {
        let s = score(
            &problem(17, Difficulty::Medium, 123, 4567),
            &big_stats(),
            &ScoringWeights::default(),
        );
        assert_eq!(s, (s * 100.0).round() / 100.0);
    }

    #[test]
    fn test_deterministic() {
        let p = problem(1234, Difficulty::Easy, 98765, 150000);
        let w = ScoringWeights::default();
        let first = score(&p, &big_stats(), &w);
        for _ in 0..10 {
            assert_eq!(score(&p, &big_stats(), &w), first);
        }
    }

    #[test]
    fn test_lower_acceptance_never_lowers_score() {
        let w = ScoringWeights::default();
        let base = problem(100, Difficulty::Medium, 400, 1000);
        let mut last = f64::NEG_INFINITY;
        for rate in [0.9, 0.7, 0.5, 0.3, 0.1, 0.0] {
            let p = Problem {
                acceptance_rate: rate,
                ..base.clone()
            };
            let s = score(&p, &big_stats(), &w);
            assert!(s >= last, "rate {} gave {} < {}", rate, s, last);
            last = s;
        }
    }

    #[test]
    fn test_more_submissions_never_raise_score() {
        let w = ScoringWeights::default();
        let base = problem(100, Difficulty::Medium, 400, 1000);
        let mut last = f64::INFINITY;
        for submitted in [0, 10, 1000, 50_000, 2_000_000] {
            let p = Problem {
                total_submitted: submitted,
                ..base.clone()
            };
            let s = score(&p, &big_stats(), &w);
            assert!(s <= last, "submitted {} gave {} > {}", submitted, s, last);
            last = s;
        }
    }

    #[test]
    fn test_newer_ids_never_lower_score() {
        let w = ScoringWeights::default();
        let mut last = f64::NEG_INFINITY;
        for id in [1, 500, 1500, 2999, 3000, 4000] {
            let s = score(&problem(id, Difficulty::Hard, 10, 100), &big_stats(), &w);
            assert!(s >= last, "id {} gave {} < {}", id, s, last);
            last = s;
        }
    }

    #[test]
    fn test_newness_is_clamped() {
        let w = ScoringWeights::default();
        let b = breakdown(&problem(9000, Difficulty::Easy, 1, 1), &big_stats(), &w);
        assert_eq!(b.newness, w.newness_premium);
    }

    #[test]
    fn test_term_bounds() {
        let w = ScoringWeights::default();
        let stats = CorpusStats::new(10, 1000, 500);

        let unsolved = breakdown(&problem(5, Difficulty::Easy, 0, 0), &stats, &w);
        assert_eq!(unsolved.acceptance, w.acceptance_impact);
        assert_eq!(unsolved.low_solve, w.low_solve_penalty);
        assert_eq!(unsolved.popularity, 0.0);

        let most_solved = breakdown(&problem(5, Difficulty::Easy, 500, 1000), &stats, &w);
        assert!(most_solved.low_solve.abs() < 1e-9);
        assert!((most_solved.popularity - w.popularity_discount).abs() < 1e-9);
    }

    #[test]
    fn test_floor_stats_do_not_produce_nan() {
        let s = score(
            &problem(1, Difficulty::Easy, 0, 0),
            &CorpusStats::default(),
            &ScoringWeights::default(),
        );
        assert!(s.is_finite());
    }

    #[test]
    fn test_tier_gap_with_equal_modifiers() {
        let w = ScoringWeights::default();
        let stats = big_stats();
        let easy = score(&problem(1500, Difficulty::Easy, 400, 1000), &stats, &w);
        let hard = score(&problem(1500, Difficulty::Hard, 400, 1000), &stats, &w);
        assert!((hard - easy - (w.hard_base - w.easy_base)).abs() < 0.011);
    }

    #[test]
    fn test_modifiers_can_cross_tiers() {
        let w = ScoringWeights::default();
        let stats = big_stats();
        let obscure_easy = score(&problem(3000, Difficulty::Easy, 0, 0), &stats, &w);
        let popular_hard = score(&problem(1, Difficulty::Hard, 1_000_000, 2_000_000), &stats, &w);
        assert!(obscure_easy > popular_hard);
    }

    #[test]
    fn test_round2_uses_exact_value() {
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(823.2149), 823.21);
        assert_eq!(round2(-79.996), -80.0);
    }

    #[test]
    fn test_alternate_weights_side_by_side() {
        let p = problem(10, Difficulty::Medium, 50, 100);
        let stats = CorpusStats::new(10, 100, 50);
        let default = ScoringWeights::default();
        let flat = ScoringWeights {
            easy_base: 0.0,
            medium_base: 0.0,
            hard_base: 0.0,
            ..default
        };

        assert_eq!(score(&p, &stats, &default) - score(&p, &stats, &flat), 200.0);
    }

    #[test]
    fn test_validate_weights() {
        assert!(ScoringWeights::default().validate().is_ok());

        let positive_discount = ScoringWeights {
            popularity_discount: 10.0,
            ..ScoringWeights::default()
        };
        assert!(positive_discount.validate().is_err());

        let nan = ScoringWeights {
            hard_base: f64::NAN,
            ..ScoringWeights::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_score_all_keeps_order() {
        let stats = CorpusStats::new(3, 10, 10);
        let scored = score_all(
            vec![
                problem(1, Difficulty::Easy, 1, 10),
                problem(2, Difficulty::Hard, 1, 10),
                problem(3, Difficulty::Medium, 1, 10),
            ],
            &stats,
            &ScoringWeights::default(),
        );
        let ids: Vec<_> = scored.iter().map(|s| s.problem.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
