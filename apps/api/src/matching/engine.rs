//! Match Engine — request-level orchestration over the scoring pipeline.
//!
//! validate → expand candidate → score every job → rank → summarize.
//! Holds the shared synonym table; cheap to clone.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::matching::explain::{explain, MatchExplanation};
use crate::matching::job_scorer::{score_job, CandidateProfile};
use crate::matching::ranking::{rank, MatchSummary, ScoredJob, DEFAULT_MIN_MATCH_PERCENTAGE};
use crate::matching::synonyms::SynonymTable;
use crate::models::job::JobRecord;

pub const EMPTY_CATALOG_MESSAGE: &str = "No jobs available at the moment";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("{0}")]
    Validation(String),

    #[error("Matching deadline exceeded")]
    DeadlineExceeded,
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchJobsRequest {
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub min_match_percentage: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanationRequest {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

/// Echo of what the engine actually matched with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDiagnostics {
    pub input_skills: Vec<String>,
    pub expanded_skills: Vec<String>,
    pub total_jobs_searched: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResponse {
    pub total_matches: usize,
    pub jobs: Vec<ScoredJob>,
    pub summary: MatchSummary,
    #[serde(rename = "debug")]
    pub diagnostics: MatchDiagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Returns the skill list when present and non-empty.
pub fn validate_skills(skills: Option<&[String]>) -> Result<&[String], MatchError> {
    match skills {
        Some(skills) if !skills.is_empty() => Ok(skills),
        _ => Err(MatchError::Validation(
            "Skills array is required and cannot be empty".to_string(),
        )),
    }
}

/// Returns `(job_id, skills)` when both are present and non-empty.
pub fn validate_explanation_request(
    request: &MatchExplanationRequest,
) -> Result<(&str, &[String]), MatchError> {
    let job_id = request.job_id.as_deref().filter(|id| !id.trim().is_empty());
    let skills = request.skills.as_deref().filter(|s| !s.is_empty());
    match (job_id, skills) {
        (Some(job_id), Some(skills)) => Ok((job_id, skills)),
        _ => Err(MatchError::Validation(
            "Job ID and skills are required".to_string(),
        )),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MatchEngine {
    synonyms: Arc<SynonymTable>,
    parallel_threshold: usize,
}

impl MatchEngine {
    /// Batches of at least `parallel_threshold` jobs are scored on the rayon
    /// pool; smaller ones run on the calling thread.
    pub fn new(synonyms: Arc<SynonymTable>, parallel_threshold: usize) -> Self {
        Self {
            synonyms,
            parallel_threshold: parallel_threshold.max(1),
        }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Scores `jobs` against the request's skills and returns the ranked,
    /// grouped shortlist. `deadline` is checked before each job is scored.
    pub fn match_jobs(
        &self,
        request: &MatchJobsRequest,
        jobs: &[JobRecord],
        deadline: Option<Instant>,
    ) -> Result<RankedResponse, MatchError> {
        let skills = validate_skills(request.skills.as_deref())?;
        let min_match_percentage = request
            .min_match_percentage
            .unwrap_or(DEFAULT_MIN_MATCH_PERCENTAGE);

        let candidate = CandidateProfile::new(
            &self.synonyms,
            skills,
            request.experience_level.as_deref(),
            request.location.as_deref(),
        );
        let diagnostics = MatchDiagnostics {
            input_skills: skills.to_vec(),
            expanded_skills: candidate.expanded_skills(),
            total_jobs_searched: jobs.len(),
        };
        debug!(
            "Input skills: {:?}, expanded skills: {:?}",
            diagnostics.input_skills, diagnostics.expanded_skills
        );

        if jobs.is_empty() {
            info!("No jobs in catalog; returning empty match response");
            return Ok(RankedResponse {
                total_matches: 0,
                jobs: vec![],
                summary: MatchSummary::default(),
                diagnostics,
                message: Some(EMPTY_CATALOG_MESSAGE.to_string()),
            });
        }

        let scored = self.score_all(&candidate, jobs, deadline)?;
        let (ranked, summary) = rank(scored, min_match_percentage);

        info!(
            "Matched {} of {} jobs (min {}%, {} candidate skills)",
            ranked.len(),
            jobs.len(),
            min_match_percentage,
            candidate.skills.len()
        );

        Ok(RankedResponse {
            total_matches: ranked.len(),
            jobs: ranked,
            summary,
            diagnostics,
            message: None,
        })
    }

    /// Matched/missing breakdown of one already-resolved job.
    pub fn explain(
        &self,
        request: &MatchExplanationRequest,
        job: &JobRecord,
    ) -> Result<MatchExplanation, MatchError> {
        let (_, skills) = validate_explanation_request(request)?;
        let explanation = explain(&self.synonyms, job, skills);
        debug!(
            "Explained job {}: {} matched, {} missing",
            job.id,
            explanation.matched_skills.len(),
            explanation.missing_skills.len()
        );
        Ok(explanation)
    }

    fn score_all(
        &self,
        candidate: &CandidateProfile,
        jobs: &[JobRecord],
        deadline: Option<Instant>,
    ) -> Result<Vec<ScoredJob>, MatchError> {
        let score_one = |job: &JobRecord| -> Result<ScoredJob, MatchError> {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(MatchError::DeadlineExceeded);
            }
            Ok(ScoredJob {
                result: score_job(&self.synonyms, candidate, job),
                job: job.clone(),
            })
        };

        if jobs.len() >= self.parallel_threshold {
            debug!("Scoring {} jobs in parallel", jobs.len());
            jobs.par_iter().map(score_one).collect()
        } else {
            jobs.iter().map(score_one).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn engine(parallel_threshold: usize) -> MatchEngine {
        MatchEngine::new(Arc::new(SynonymTable::default()), parallel_threshold)
    }

    fn make_job(id: &str, skills: &[&str], day: u32) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            job_title: format!("Job {id}"),
            company_name: "Acme".to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            posting_date: Some(Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn request(skills: &[&str]) -> MatchJobsRequest {
        MatchJobsRequest {
            skills: Some(skills.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_skills_is_validation_error() {
        let err = engine(64)
            .match_jobs(&MatchJobsRequest::default(), &[], None)
            .unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_empty_skills_is_validation_error() {
        let err = engine(64).match_jobs(&request(&[]), &[], None).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_empty_catalog_returns_message() {
        let response = engine(64).match_jobs(&request(&["rust"]), &[], None).unwrap();
        assert_eq!(response.total_matches, 0);
        assert!(response.jobs.is_empty());
        assert_eq!(response.message.as_deref(), Some(EMPTY_CATALOG_MESSAGE));
        assert_eq!(response.diagnostics.total_jobs_searched, 0);
    }

    #[test]
    fn test_ranks_and_filters_catalog() {
        let jobs = vec![
            make_job("frontend", &["JavaScript", "React"], 1),
            make_job("backend", &["Java", "Spring"], 2),
            make_job("empty", &[], 3),
        ];
        let response = engine(64)
            .match_jobs(&request(&["js", "reactjs"]), &jobs, None)
            .unwrap();

        assert_eq!(response.total_matches, response.jobs.len());
        assert_eq!(response.jobs[0].job.id, "frontend");
        assert_eq!(response.jobs[0].result.match_score, 20);
        assert!(response.jobs.iter().all(|j| j.job.id != "empty"));
        assert_eq!(response.diagnostics.total_jobs_searched, 3);
        assert_eq!(response.diagnostics.input_skills, vec!["js", "reactjs"]);
    }

    #[test]
    fn test_zero_threshold_keeps_skill_less_job() {
        let jobs = vec![make_job("empty", &[], 3)];
        let mut req = request(&["rust"]);
        req.min_match_percentage = Some(0);
        let response = engine(64).match_jobs(&req, &jobs, None).unwrap();
        assert_eq!(response.total_matches, 1);
        assert_eq!(response.jobs[0].result.match_percentage, 0);
        assert_eq!(response.jobs[0].result.skill_coverage, 0);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let jobs: Vec<JobRecord> = (1..=28)
            .map(|d| {
                let skills: &[&str] = match d % 4 {
                    0 => &["Python", "Django"],
                    1 => &["React", "Node"],
                    2 => &["Docker", "Kubernetes", "AWS"],
                    _ => &["Java"],
                };
                make_job(&format!("j{d}"), skills, d)
            })
            .collect();
        let req = request(&["react", "node.js", "docker", "py"]);

        let sequential = engine(usize::MAX).match_jobs(&req, &jobs, None).unwrap();
        let parallel = engine(1).match_jobs(&req, &jobs, None).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let jobs = vec![make_job("a", &["Rust"], 1)];
        let past = Instant::now() - Duration::from_millis(1);
        let err = engine(64)
            .match_jobs(&request(&["rust"]), &jobs, Some(past))
            .unwrap_err();
        assert_eq!(err, MatchError::DeadlineExceeded);
    }

    #[test]
    fn test_explain_requires_job_id_and_skills() {
        let job = make_job("a", &["Rust"], 1);
        let req = MatchExplanationRequest {
            job_id: None,
            skills: Some(vec!["rust".to_string()]),
        };
        assert!(matches!(
            engine(64).explain(&req, &job),
            Err(MatchError::Validation(_))
        ));
    }

    #[test]
    fn test_explain_delegates() {
        let job = make_job("a", &["React", "Node"], 1);
        let req = MatchExplanationRequest {
            job_id: Some("a".to_string()),
            skills: Some(vec!["reactjs".to_string()]),
        };
        let explanation = engine(64).explain(&req, &job).unwrap();
        assert_eq!(explanation.match_percentage, 50);
    }
}
