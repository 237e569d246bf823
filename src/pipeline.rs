use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::models::{CorpusStats, ScoredProblem};
use crate::normalize::{normalize, SkipSummary};
use crate::scoring::{score_all, ScoringWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Fetch,
}

impl DataSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Cache => "cache",
            DataSource::Fetch => "upstream",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RankReport {
    pub problems: Vec<ScoredProblem>,
    pub stats: CorpusStats,
    pub raw_count: usize,
    pub skipped: SkipSummary,
    pub source: DataSource,
}

impl RankReport {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn position(&self, slug: &str) -> Option<usize> {
        self.problems.iter().position(|p| p.problem.slug == slug)
    }
}

pub struct RankingPipeline<'a, F: Fetcher> {
    cache: &'a CacheStore,
    fetcher: &'a F,
    weights: ScoringWeights,
    refresh: bool,
}

impl<'a, F: Fetcher> RankingPipeline<'a, F> {
    pub fn new(cache: &'a CacheStore, fetcher: &'a F, weights: ScoringWeights) -> Self {
        Self {
            cache,
            fetcher,
            weights,
            refresh: false,
        }
    }

    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn rank(&self) -> Result<RankReport, PipelineError> {
        self.rank_at(Utc::now())
    }

    pub fn rank_at(&self, now: DateTime<Utc>) -> Result<RankReport, PipelineError> {
        let (raw, source) = self.resolve(now)?;
        info!(count = raw.len(), source = source.display_name(), "processing raw problem entries");

        let normalized = normalize(&raw);
        if normalized.skipped.total() > 0 {
            for (reason, count) in normalized.skipped.iter() {
                debug!(reason, count, "skipped problems");
            }
            info!(
                kept = normalized.problems.len(),
                skipped = normalized.skipped.total(),
                "filtered problems"
            );
        }

        if normalized.is_empty() {
            warn!(raw = raw.len(), "no problems left after filtering");
        }

        let stats = normalized.stats;
        let mut problems = score_all(normalized.problems, &stats, &self.weights);
        // Vec::sort_by is stable, so equal scores keep their input order.
        problems.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(RankReport {
            problems,
            stats,
            raw_count: raw.len(),
            skipped: normalized.skipped,
            source,
        })
    }

    fn resolve(&self, now: DateTime<Utc>) -> Result<(Vec<Value>, DataSource), PipelineError> {
        if !self.refresh {
            match self.cache.load_at(now) {
                Ok(Some(raw)) if !raw.is_empty() => {
                    info!(path = %self.cache.path().display(), "loaded problems from cache");
                    return Ok((raw, DataSource::Cache));
                }
                Ok(_) => debug!("cache miss"),
                Err(e) => warn!("cache unavailable, refetching: {}", e),
            }
        }

        let raw = self.fetcher.fetch().map_err(PipelineError::NoData)?;

        if raw.is_empty() {
            warn!("upstream returned no problems; cache left unchanged");
        } else if let Err(e) = self.cache.save_at(&raw, now) {
            warn!("failed to update cache, it stays stale: {}", e);
        } else {
            info!(count = raw.len(), path = %self.cache.path().display(), "saved problems to cache");
        }

        Ok((raw, DataSource::Fetch))
    }
}
