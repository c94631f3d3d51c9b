use std::sync::Arc;

use crate::catalog::JobCatalog;
use crate::config::Config;
use crate::matching::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only job source. Default: in-memory snapshot loaded from JOBS_PATH.
    pub catalog: Arc<dyn JobCatalog>,
    /// Scoring engine; carries the process-wide synonym table.
    pub engine: MatchEngine,
    pub config: Config,
}
