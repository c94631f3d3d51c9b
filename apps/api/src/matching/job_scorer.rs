//! Job Scorer — composite points, percentage and coverage for one job.
//!
//! Algorithm:
//! 1. Expand the job's required skills through the synonym table.
//! 2. For every candidate skill, take the best similarity against the
//!    expanded job skills and award tiered points (10 / 8 / 5 / 2).
//! 3. Add flat bonuses for experience level and location (5 each).
//! 4. percentage = score / (candidate skills × 10 + 10), capped at 100.

use serde::{Deserialize, Serialize};

use crate::matching::normalize::normalize;
use crate::matching::similarity::{similarity, variant_score, word_overlap, ResolvedSkill};
use crate::matching::synonyms::SynonymTable;
use crate::models::job::{non_blank, JobRecord};

/// Minimum similarity for the experience-level and location bonuses.
pub const BONUS_THRESHOLD: f64 = 0.7;
pub const BONUS_POINTS: u32 = 5;
pub const POINTS_PER_SKILL: u32 = 10;
/// Headroom reserved for the two bonuses in the denominator.
pub const BONUS_HEADROOM: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Candidate side
// ────────────────────────────────────────────────────────────────────────────

/// One distinct candidate skill and the variants it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSkill {
    /// Normalized skill as the candidate wrote it.
    pub skill: String,
    pub variants: Vec<String>,
    /// `variants` bucketed by the list each one resolves to. Usually a single
    /// bucket; a variant shared with an earlier group (`ai`) gets its own.
    pub groups: Vec<VariantGroup>,
}

/// Candidate variants that resolve to the same synonym list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup {
    pub resolved: Vec<String>,
    pub texts: Vec<String>,
}

fn group_variants(table: &SynonymTable, variants: &[String]) -> Vec<VariantGroup> {
    let mut groups: Vec<VariantGroup> = Vec::new();
    for variant in variants {
        let resolved = table.lookup(variant);
        if let Some(group) = groups.iter_mut().find(|g| g.resolved[..] == resolved[..]) {
            group.texts.push(variant.clone());
            continue;
        }
        groups.push(VariantGroup {
            resolved: resolved.into_owned(),
            texts: vec![variant.clone()],
        });
    }
    groups
}

/// Candidate skills expanded once per request and reused for every job.
#[derive(Debug, Clone, Default)]
pub struct CandidateProfile {
    pub skills: Vec<CandidateSkill>,
    pub experience_level: Option<String>,
    pub location: Option<String>,
}

impl CandidateProfile {
    /// Normalizes and expands `skills`. Skills resolving to the same variant
    /// list (aliases of one group, or repeats) collapse into the first one.
    pub fn new<S: AsRef<str>>(
        table: &SynonymTable,
        skills: &[S],
        experience_level: Option<&str>,
        location: Option<&str>,
    ) -> Self {
        let mut expanded: Vec<CandidateSkill> = Vec::with_capacity(skills.len());
        for raw in skills {
            let skill = normalize(raw.as_ref());
            let variants = table.expand_variants(&skill);
            if expanded.iter().any(|c| c.variants == variants) {
                continue;
            }
            let groups = group_variants(table, &variants);
            expanded.push(CandidateSkill {
                skill,
                variants,
                groups,
            });
        }

        Self {
            skills: expanded,
            experience_level: non_blank(experience_level).map(str::to_string),
            location: non_blank(location).map(str::to_string),
        }
    }

    /// Flat, deduplicated variant list, for diagnostics.
    pub fn expanded_skills(&self) -> Vec<String> {
        let mut flat: Vec<String> = Vec::new();
        for candidate in &self.skills {
            for variant in &candidate.variants {
                if !flat.contains(variant) {
                    flat.push(variant.clone());
                }
            }
        }
        flat
    }

    pub fn max_possible_score(&self) -> u32 {
        self.skills.len() as u32 * POINTS_PER_SKILL + BONUS_HEADROOM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Strong,
    Partial,
    Weak,
}

impl MatchType {
    /// Tier for a best-match similarity, `None` below 0.4.
    pub fn from_similarity(score: f64) -> Option<Self> {
        if score >= 1.0 {
            Some(MatchType::Exact)
        } else if score >= 0.8 {
            Some(MatchType::Strong)
        } else if score >= 0.6 {
            Some(MatchType::Partial)
        } else if score >= 0.4 {
            Some(MatchType::Weak)
        } else {
            None
        }
    }

    pub fn points(self) -> u32 {
        match self {
            MatchType::Exact => 10,
            MatchType::Strong => 8,
            MatchType::Partial => 5,
            MatchType::Weak => 2,
        }
    }

    /// Weak matches earn points but do not count as covering a job skill.
    pub fn counts_toward_coverage(self) -> bool {
        !matches!(self, MatchType::Weak)
    }
}

/// Trace entry: which job skill a candidate skill matched, and for how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub candidate_skill: String,
    pub job_skill: String,
    pub match_type: MatchType,
    pub points_awarded: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub match_score: u32,
    pub match_percentage: u32,
    pub skill_coverage: u32,
    pub matched_skills: Vec<String>,
    pub total_skills_matched: usize,
    pub total_skills_required: usize,
    pub skill_match_details: Vec<SkillMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores one job. A job with no required skills scores zero everywhere.
pub fn score_job(
    table: &SynonymTable,
    candidate: &CandidateProfile,
    job: &JobRecord,
) -> MatchResult {
    if job.skills.is_empty() {
        return MatchResult::default();
    }

    let expanded = table.expand_all(&job.skills);
    let job_skills: Vec<ResolvedSkill<'_>> = expanded
        .iter()
        .map(|skill| ResolvedSkill::from_normalized(table, skill))
        .collect();

    let mut match_score = 0_u32;
    let mut matched_skills: Vec<String> = Vec::new();
    let mut skill_match_details: Vec<SkillMatch> = Vec::new();

    for candidate_skill in &candidate.skills {
        let Some((best, job_skill)) = best_match(candidate_skill, &job_skills) else {
            continue;
        };
        let Some(match_type) = MatchType::from_similarity(best) else {
            continue;
        };

        let points = match_type.points();
        match_score += points;
        if match_type.counts_toward_coverage()
            && !matched_skills.contains(&candidate_skill.skill)
        {
            matched_skills.push(candidate_skill.skill.clone());
        }
        skill_match_details.push(SkillMatch {
            candidate_skill: candidate_skill.skill.clone(),
            job_skill: job_skill.to_string(),
            match_type,
            points_awarded: points,
        });
    }

    if bonus_applies(
        table,
        candidate.experience_level.as_deref(),
        job.experience_level(),
    ) {
        match_score += BONUS_POINTS;
    }
    if bonus_applies(table, candidate.location.as_deref(), job.location()) {
        match_score += BONUS_POINTS;
    }

    let match_percentage = percentage(
        match_score as usize,
        candidate.max_possible_score() as usize,
    );
    let skill_coverage = percentage(matched_skills.len(), job.skills.len());

    MatchResult {
        match_score,
        match_percentage,
        skill_coverage,
        total_skills_matched: matched_skills.len(),
        total_skills_required: job.skills.len(),
        matched_skills,
        skill_match_details,
    }
}

/// Highest similarity of any candidate variant against any job skill.
/// Ties keep the earliest job skill; `None` when nothing scores above zero.
///
/// Variants sharing a resolved list share the pair score, so it is computed
/// once per bucket. Only the word-overlap fallback looks at each variant.
fn best_match<'a>(
    candidate: &CandidateSkill,
    job_skills: &'a [ResolvedSkill<'_>],
) -> Option<(f64, &'a str)> {
    let mut best: Option<(f64, &'a str)> = None;
    for job_skill in job_skills {
        for group in &candidate.groups {
            let score = variant_score(&group.resolved, &job_skill.variants).unwrap_or_else(|| {
                group
                    .texts
                    .iter()
                    .map(|text| word_overlap(text, &job_skill.text))
                    .fold(0.0, f64::max)
            });
            if score > best.map_or(0.0, |(s, _)| s) {
                best = Some((score, job_skill.text.as_ref()));
            }
        }
    }
    best
}

fn bonus_applies(table: &SynonymTable, wanted: Option<&str>, offered: Option<&str>) -> bool {
    match (wanted, offered) {
        (Some(w), Some(o)) => similarity(table, w, o) >= BONUS_THRESHOLD,
        _ => false,
    }
}

/// `round(part / whole * 100)` capped at 100; 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().min(100.0) as u32
}
