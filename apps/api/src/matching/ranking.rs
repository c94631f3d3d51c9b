//! Ranking — threshold filter, deterministic multi-key sort, truncation and
//! quality-tier summary.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::matching::job_scorer::MatchResult;
use crate::models::job::JobRecord;

pub const DEFAULT_MIN_MATCH_PERCENTAGE: i32 = 15;
pub const MAX_RESULTS: usize = 20;

/// A job record with its match result flattened alongside the job fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: JobRecord,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
}

impl QualityTier {
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 70 {
            QualityTier::Excellent
        } else if percentage >= 50 {
            QualityTier::Good
        } else {
            QualityTier::Fair
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub average_match: u32,
}

impl MatchSummary {
    pub fn from_jobs(jobs: &[ScoredJob]) -> Self {
        let mut summary = MatchSummary::default();
        for scored in jobs {
            match QualityTier::from_percentage(scored.result.match_percentage) {
                QualityTier::Excellent => summary.excellent += 1,
                QualityTier::Good => summary.good += 1,
                QualityTier::Fair => summary.fair += 1,
            }
        }

        if !jobs.is_empty() {
            let total: u64 = jobs.iter().map(|j| j.result.match_percentage as u64).sum();
            summary.average_match = (total as f64 / jobs.len() as f64).round() as u32;
        }
        summary
    }
}

/// Score desc, then coverage desc, then most recent posting first.
/// Postings without a date sort after dated ones.
pub fn compare_scored(a: &ScoredJob, b: &ScoredJob) -> Ordering {
    b.result
        .match_score
        .cmp(&a.result.match_score)
        .then_with(|| b.result.skill_coverage.cmp(&a.result.skill_coverage))
        .then_with(|| b.job.posting_date.cmp(&a.job.posting_date))
}

/// Drops jobs under `min_match_percentage`, sorts with [`compare_scored`]
/// (stable, so full ties keep catalog order) and keeps the top
/// [`MAX_RESULTS`].
pub fn rank(mut scored: Vec<ScoredJob>, min_match_percentage: i32) -> (Vec<ScoredJob>, MatchSummary) {
    scored.retain(|s| i64::from(s.result.match_percentage) >= i64::from(min_match_percentage));
    scored.sort_by(compare_scored);
    scored.truncate(MAX_RESULTS);

    let summary = MatchSummary::from_jobs(&scored);
    (scored, summary)
}
