//! Axum route handlers for the Matching API.

use std::time::Instant;

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::matching::engine::{
    validate_explanation_request, validate_skills, MatchExplanationRequest, MatchJobsRequest,
    RankedResponse,
};
use crate::matching::explain::MatchExplanation;
use crate::state::AppState;

/// POST /api/v1/jobs/match
///
/// Scores the whole catalog against the candidate's skills and returns the
/// top 20 matches with a tier summary. Scoring runs off the async workers.
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    payload: Result<Json<MatchJobsRequest>, JsonRejection>,
) -> Result<Json<RankedResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    validate_skills(request.skills.as_deref())?;

    let jobs = state.catalog.all_jobs().await?;
    let deadline = Instant::now() + state.config.match_timeout();
    let engine = state.engine.clone();

    let response =
        tokio::task::spawn_blocking(move || engine.match_jobs(&request, &jobs, Some(deadline)))
            .await
            .map_err(|e| AppError::Internal(anyhow!("Matching task failed: {e}")))??;

    Ok(Json(response))
}

/// POST /api/v1/jobs/match-explanation
///
/// Lists which of one job's required skills the candidate covers.
pub async fn handle_match_explanation(
    State(state): State<AppState>,
    payload: Result<Json<MatchExplanationRequest>, JsonRejection>,
) -> Result<Json<MatchExplanation>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let (job_id, _) = validate_explanation_request(&request)?;

    let job = state
        .catalog
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let explanation = state.engine.explain(&request, &job)?;
    Ok(Json(explanation))
}
