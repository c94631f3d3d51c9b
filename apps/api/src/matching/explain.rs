use serde::{Deserialize, Serialize};

use crate::matching::job_scorer::percentage;
use crate::matching::similarity::{similarity_resolved, ResolvedSkill};
use crate::matching::synonyms::SynonymTable;
use crate::models::job::JobRecord;

/// Similarity at which a candidate skill counts as covering a job skill.
pub const EXPLAIN_THRESHOLD: f64 = 0.7;
const MAX_SUGGESTIONS: usize = 3;

/// Per-job breakdown of covered and missing requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub job_title: String,
    pub company_name: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub match_percentage: u32,
    pub recommendations: String,
}

/// Splits the job's normalized skills into matched and missing against
/// `candidate_skills`. Unlike ranking, no points or bonuses are involved.
pub fn explain<S: AsRef<str>>(
    table: &SynonymTable,
    job: &JobRecord,
    candidate_skills: &[S],
) -> MatchExplanation {
    let candidates: Vec<ResolvedSkill<'_>> = candidate_skills
        .iter()
        .map(|s| ResolvedSkill::new(table, s.as_ref()))
        .collect();

    let mut matched_skills = Vec::new();
    let mut missing_skills = Vec::new();

    for job_skill in job.skills.iter().map(|s| ResolvedSkill::new(table, s)) {
        let covered = candidates
            .iter()
            .any(|c| similarity_resolved(c, &job_skill) >= EXPLAIN_THRESHOLD);
        if covered {
            matched_skills.push(job_skill.text.into_owned());
        } else {
            missing_skills.push(job_skill.text.into_owned());
        }
    }

    let match_percentage = percentage(matched_skills.len(), job.skills.len());
    let recommendations = build_recommendation(&missing_skills);

    MatchExplanation {
        job_title: job.job_title.clone(),
        company_name: job.company_name.clone(),
        matched_skills,
        missing_skills,
        match_percentage,
        recommendations,
    }
}

fn build_recommendation(missing: &[String]) -> String {
    if missing.is_empty() {
        return "You have all the required skills!".to_string();
    }
    let top: Vec<&str> = missing.iter().take(MAX_SUGGESTIONS).map(String::as_str).collect();
    format!("Consider learning: {}", top.join(", "))
}
