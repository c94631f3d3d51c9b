// Job matching engine.
// normalize → synonym expansion → similarity → per-job scoring → ranking.
// Explanations reuse the same similarity with a single 0.7 cut-off.

pub mod engine;
pub mod explain;
pub mod handlers;
pub mod job_scorer;
pub mod normalize;
pub mod ranking;
pub mod similarity;
pub mod synonyms;
