use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CorpusStats, Difficulty, Problem};

const MISSING_TITLE: &str = "N/A";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("missing stat block")]
    MissingStat,

    #[error("missing difficulty block")]
    MissingDifficulty,

    #[error("paid-only problem")]
    PaidOnly,

    #[error("missing or zero question id")]
    MissingId,

    #[error("missing title slug")]
    MissingSlug,

    #[error("unknown difficulty level {0}")]
    UnknownDifficulty(u64),

    #[error("field '{field}' is not a non-negative integer: {value}")]
    BadField { field: &'static str, value: String },
}

impl SkipReason {
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::MissingStat => "missing stat",
            SkipReason::MissingDifficulty => "missing difficulty",
            SkipReason::PaidOnly => "paid only",
            SkipReason::MissingId => "missing id",
            SkipReason::MissingSlug => "missing slug",
            SkipReason::UnknownDifficulty(_) => "unknown difficulty",
            SkipReason::BadField { .. } => "bad field",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Kept(Problem),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSummary {
    counts: BTreeMap<&'static str, usize>,
}

impl SkipSummary {
    pub fn record(&mut self, reason: &SkipReason) {
        *self.counts.entry(reason.label()).or_insert(0) += 1;
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    #[cfg(test)]
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(label, n)| (*label, *n))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub problems: Vec<Problem>,
    pub stats: CorpusStats,
    pub skipped: SkipSummary,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn normalize(raw: &[Value]) -> Normalized {
    let mut problems = Vec::with_capacity(raw.len());
    let mut skipped = SkipSummary::default();
    let (mut max_id, mut max_submitted, mut max_accepted) = (0u64, 0u64, 0u64);

    for record in raw {
        match normalize_record(record) {
            RecordOutcome::Kept(problem) => {
                max_id = max_id.max(problem.id);
                max_submitted = max_submitted.max(problem.total_submitted);
                max_accepted = max_accepted.max(problem.total_accepted);
                problems.push(problem);
            }
            RecordOutcome::Skipped(reason) => {
                if let SkipReason::BadField { .. } = reason {
                    warn!(slug = record_slug(record), "skipping problem: {}", reason);
                } else {
                    debug!(slug = record_slug(record), "skipping problem: {}", reason);
                }
                skipped.record(&reason);
            }
        }
    }

    Normalized {
        problems,
        stats: CorpusStats::new(max_id, max_submitted, max_accepted),
        skipped,
    }
}

pub fn normalize_record(record: &Value) -> RecordOutcome {
    match try_normalize(record) {
        Ok(problem) => RecordOutcome::Kept(problem),
        Err(reason) => RecordOutcome::Skipped(reason),
    }
}

fn try_normalize(record: &Value) -> Result<Problem, SkipReason> {
    let stat = block(record, "stat").ok_or(SkipReason::MissingStat)?;
    let difficulty = block(record, "difficulty").ok_or(SkipReason::MissingDifficulty)?;

    if is_truthy(record.get("paid_only")) {
        return Err(SkipReason::PaidOnly);
    }

    let id = coerce_count(stat, "frontend_question_id")?;
    let title = stat
        .get("question__title")
        .and_then(Value::as_str)
        .unwrap_or(MISSING_TITLE)
        .to_string();
    let slug = stat
        .get("question__title_slug")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();
    let total_accepted = coerce_count(stat, "total_acs")?;
    let total_submitted = coerce_count(stat, "total_submitted")?;
    let level = coerce_count(difficulty, "level")?;

    if slug.is_empty() || slug == MISSING_TITLE {
        return Err(SkipReason::MissingSlug);
    }
    if id == 0 {
        return Err(SkipReason::MissingId);
    }
    let tier = Difficulty::from_level(level).ok_or(SkipReason::UnknownDifficulty(level))?;

    Ok(Problem::new(
        id,
        title,
        slug.to_string(),
        tier,
        total_accepted,
        total_submitted,
    ))
}

/// A required sub-object; `null`, empty objects and non-objects count as missing.
fn block<'a>(record: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    record
        .get(key)
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Reads a non-negative integer field. An absent field counts as zero.
fn coerce_count(block: &Map<String, Value>, field: &'static str) -> Result<u64, SkipReason> {
    let bad = |value: &Value| SkipReason::BadField {
        field,
        value: value.to_string(),
    };

    let Some(value) = block.get(field) else {
        return Ok(0);
    };

    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => {
                        Ok(f.trunc() as u64)
                    }
                    _ => Err(bad(value)),
                }
            }
        }
        Value::String(s) => s.trim().parse::<u64>().map_err(|_| bad(value)),
        _ => Err(bad(value)),
    }
}

fn record_slug(record: &Value) -> &str {
    record
        .get("stat")
        .and_then(|s| s.get("question__title_slug"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}
