use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jobmatch_api::matching::engine::{MatchEngine, MatchJobsRequest};
use jobmatch_api::matching::job_scorer::{score_job, CandidateProfile, MatchType};
use jobmatch_api::matching::normalize::normalize;
use jobmatch_api::matching::similarity::similarity;
use jobmatch_api::matching::synonyms::{SynonymTable, DEFAULT_SYNONYMS};
use jobmatch_api::models::job::JobRecord;
use proptest::prelude::*;

/// Mix of known aliases and free text so both table hits and misses occur.
fn skill() -> impl Strategy<Value = String> {
    let known: Vec<String> = DEFAULT_SYNONYMS
        .iter()
        .flat_map(|(_, variants)| variants.iter().map(|v| v.to_uppercase()))
        .collect();
    prop_oneof![
        prop::sample::select(known),
        "[A-Za-z#+. -]{0,16}",
        "\\PC{0,12}",
    ]
}

fn job(id: usize, skills: Vec<String>, day: u32) -> JobRecord {
    JobRecord {
        id: format!("job-{id}"),
        skills,
        posting_date: Some(Utc.with_ymd_and_hms(2024, 6, day, 0, 0, 0).unwrap()),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn expansion_contains_normalized_input(s in skill()) {
        let table = SynonymTable::default();
        let variants = table.expand_variants(&s);
        prop_assert!(variants.contains(&normalize(&s)));
    }

    #[test]
    fn similarity_is_bounded(a in skill(), b in skill()) {
        let table = SynonymTable::default();
        let score = similarity(&table, &a, &b);
        prop_assert!((0.0..=1.0).contains(&score), "similarity {} out of range", score);
    }

    #[test]
    fn equal_after_normalization_is_exact(s in skill(), pad in "[ \t]{0,3}") {
        let table = SynonymTable::default();
        let other = format!("{pad}{}{pad}", s.to_lowercase());
        prop_assert_eq!(similarity(&table, &s, &other), 1.0);
    }

    #[test]
    fn percentages_are_bounded(
        candidate in prop::collection::vec(skill(), 1..6),
        required in prop::collection::vec(skill(), 0..6),
    ) {
        let table = SynonymTable::default();
        let profile = CandidateProfile::new(&table, &candidate, Some("senior"), Some("remote"));
        let result = score_job(&table, &profile, &job(0, required, 1));
        prop_assert!(result.match_percentage <= 100);
        prop_assert!(result.skill_coverage <= 100);
    }

    #[test]
    fn adding_exact_match_never_lowers_score(
        candidate in prop::collection::vec(skill(), 1..5),
        required in prop::collection::vec(skill(), 0..5),
    ) {
        let table = SynonymTable::default();
        let extra = "zz-unlisted-skill".to_string();
        let mut required_with_extra = required.clone();
        required_with_extra.push(extra.clone());
        let target = job(0, required_with_extra, 1);

        let before_profile = CandidateProfile::new(&table, &candidate, None, None);
        let before = score_job(&table, &before_profile, &target);

        let mut extended = candidate.clone();
        extended.push(extra);
        let after_profile = CandidateProfile::new(&table, &extended, None, None);
        let after = score_job(&table, &after_profile, &target);

        prop_assert!(after.match_score >= before.match_score);
        prop_assert!(after.match_percentage >= before.match_percentage);
    }

    #[test]
    fn best_match_equals_pairwise_maximum(
        candidate in skill(),
        required in prop::collection::vec(skill(), 1..5),
    ) {
        let table = SynonymTable::default();
        let profile = CandidateProfile::new(&table, &[candidate], None, None);
        let expanded = table.expand_all(&required);

        let mut pairwise = 0.0_f64;
        for variant in &profile.skills[0].variants {
            for job_skill in &expanded {
                pairwise = pairwise.max(similarity(&table, variant, job_skill));
            }
        }
        let expected = MatchType::from_similarity(pairwise).map_or(0, MatchType::points);

        let result = score_job(&table, &profile, &job(0, required, 1));
        prop_assert_eq!(result.match_score, expected);
    }

    #[test]
    fn ranking_is_deterministic(
        candidate in prop::collection::vec(skill(), 1..4),
        catalog in prop::collection::vec(prop::collection::vec(skill(), 0..4), 0..12),
    ) {
        let engine = MatchEngine::new(Arc::new(SynonymTable::default()), 4);
        let jobs: Vec<JobRecord> = catalog
            .into_iter()
            .enumerate()
            .map(|(i, skills)| job(i, skills, (i % 28) as u32 + 1))
            .collect();
        let request = MatchJobsRequest {
            skills: Some(candidate),
            min_match_percentage: Some(0),
            ..Default::default()
        };

        let first = engine.match_jobs(&request, &jobs, None).unwrap();
        let second = engine.match_jobs(&request, &jobs, None).unwrap();
        prop_assert_eq!(first, second);
    }
}
