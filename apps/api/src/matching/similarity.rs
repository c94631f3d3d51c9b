//! Graded string similarity over synonym-expanded skills.
//!
//! Buckets:
//! - `1.0` — same spelling after expansion
//! - `(0.7, 0.9]` — one variant contains the other
//! - `(0.4, 0.7]` — shared words between the raw (normalized) strings
//! - `0.0` — unrelated

use std::borrow::Cow;

use crate::matching::normalize::normalize;
use crate::matching::synonyms::SynonymTable;

pub const EXACT: f64 = 1.0;
const CONTAINMENT_BASE: f64 = 0.7;
const CONTAINMENT_SPAN: f64 = 0.2;
const OVERLAP_BASE: f64 = 0.4;
const OVERLAP_SPAN: f64 = 0.3;

/// A normalized string and the variant list it resolves to.
///
/// Build these once per request (candidate side) or once per job (job side)
/// and compare with [`similarity_resolved`] inside loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSkill<'a> {
    pub text: Cow<'a, str>,
    pub variants: Cow<'a, [String]>,
}

impl<'a> ResolvedSkill<'a> {
    pub fn new(table: &'a SynonymTable, raw: &str) -> Self {
        let text = normalize(raw);
        let variants = table.lookup(&text);
        Self {
            text: Cow::Owned(text),
            variants,
        }
    }

    /// `text` must already be normalized.
    pub fn from_normalized(table: &'a SynonymTable, text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            variants: table.lookup(text),
        }
    }
}

/// Similarity of `a` and `b` in `[0, 1]`.
///
/// Variant pairs are visited in table order; the first pair that is either
/// equal or in a containment relation decides the score. Only when no pair
/// qualifies does the word-overlap fallback run, on the pre-expansion strings.
pub fn similarity(table: &SynonymTable, a: &str, b: &str) -> f64 {
    similarity_resolved(&ResolvedSkill::new(table, a), &ResolvedSkill::new(table, b))
}

/// [`similarity`] without the normalization and table lookups.
pub fn similarity_resolved(a: &ResolvedSkill<'_>, b: &ResolvedSkill<'_>) -> f64 {
    variant_score(&a.variants, &b.variants).unwrap_or_else(|| word_overlap(&a.text, &b.text))
}

/// Score of the first equal or containing pair across two variant lists.
pub fn variant_score(variants1: &[String], variants2: &[String]) -> Option<f64> {
    for v1 in variants1 {
        for v2 in variants2 {
            if v1 == v2 {
                return Some(EXACT);
            }
            if v1.contains(v2.as_str()) || v2.contains(v1.as_str()) {
                return Some(containment_score(v1, v2));
            }
        }
    }
    None
}

/// Normalized strings are ASCII, so byte length is character length.
fn containment_score(v1: &str, v2: &str) -> f64 {
    let shorter = v1.len().min(v2.len()) as f64;
    let longer = v1.len().max(v2.len()) as f64;
    CONTAINMENT_BASE + (shorter / longer) * CONTAINMENT_SPAN
}

/// Counts words of `s1` that also occur in `s2` (repeats in `s1` count again).
pub fn word_overlap(s1: &str, s2: &str) -> f64 {
    let words1: Vec<&str> = s1.split_whitespace().collect();
    let words2: Vec<&str> = s2.split_whitespace().collect();

    let common = words1.iter().filter(|w| words2.contains(w)).count();
    if common == 0 {
        return 0.0;
    }

    let denominator = words1.len().max(words2.len()) as f64;
    OVERLAP_BASE + (common as f64 / denominator) * OVERLAP_SPAN
}
