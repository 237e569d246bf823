use super::difficulty::Difficulty;

const PROBLEM_URL_PREFIX: &str = "https://leetcode.com/problems/";

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub difficulty: Difficulty,
    pub total_accepted: u64,
    pub total_submitted: u64,
    pub acceptance_rate: f64,
    pub url: String,
}

impl Problem {
    pub fn new(
        id: u64,
        title: String,
        slug: String,
        difficulty: Difficulty,
        total_accepted: u64,
        total_submitted: u64,
    ) -> Self {
        let acceptance_rate = acceptance_rate(total_accepted, total_submitted);
        let url = problem_url(&slug);
        Self {
            id,
            title,
            slug,
            difficulty,
            total_accepted,
            total_submitted,
            acceptance_rate,
            url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProblem {
    pub problem: Problem,
    pub score: f64,
}

/// Corpus-wide maxima used to normalize counts. Every field is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    pub max_id: u64,
    pub max_submitted: u64,
    pub max_accepted: u64,
}

impl CorpusStats {
    pub fn new(max_id: u64, max_submitted: u64, max_accepted: u64) -> Self {
        Self {
            max_id: max_id.max(1),
            max_submitted: max_submitted.max(1),
            max_accepted: max_accepted.max(1),
        }
    }
}

impl Default for CorpusStats {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

pub fn acceptance_rate(total_accepted: u64, total_submitted: u64) -> f64 {
    if total_submitted == 0 {
        return 0.0;
    }
    (total_accepted as f64 / total_submitted as f64).clamp(0.0, 1.0)
}

pub fn problem_url(slug: &str) -> String {
    format!("{}{}/", PROBLEM_URL_PREFIX, slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_rate_zero_submissions() {
        assert_eq!(acceptance_rate(0, 0), 0.0);
        assert_eq!(acceptance_rate(12, 0), 0.0);
    }

    #[test]
    fn test_acceptance_rate_is_clamped() {
        assert_eq!(acceptance_rate(50, 200), 0.25);
        assert_eq!(acceptance_rate(300, 200), 1.0);
    }

    #[test]
    fn test_problem_url() {
        let p = Problem::new(1, "Two Sum".into(), "two-sum".into(), Difficulty::Easy, 5, 10);
        assert_eq!(p.url, "https://leetcode.com/problems/two-sum/");
        assert_eq!(p.acceptance_rate, 0.5);
    }

    #[test]
    fn test_stats_floor_at_one() {
        let stats = CorpusStats::new(0, 0, 7);
        assert_eq!(stats.max_id, 1);
        assert_eq!(stats.max_submitted, 1);
        assert_eq!(stats.max_accepted, 7);
        assert_eq!(CorpusStats::default(), CorpusStats::new(1, 1, 1));
    }
}
