//! Job catalog — the read side of job storage, as seen by the matcher.
//!
//! `AppState` holds an `Arc<dyn JobCatalog>`. The shipped backend is an
//! in-memory snapshot read once at startup; records are never written.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::models::job::JobRecord;

#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Every job currently listed, in catalog order.
    async fn all_jobs(&self) -> Result<Vec<JobRecord>, AppError>;

    async fn find_job(&self, job_id: &str) -> Result<Option<JobRecord>, AppError>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryJobCatalog {
    jobs: Arc<Vec<JobRecord>>,
}

impl InMemoryJobCatalog {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Arc::new(jobs),
        }
    }

    /// Reads a JSON array of job records from `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        info!("Loading job catalog from {}...", path.display());

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job catalog at {}", path.display()))?;
        let jobs: Vec<JobRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Job catalog at {} is not a JSON array of jobs", path.display()))?;

        info!("Job catalog loaded ({} jobs)", jobs.len());
        Ok(Self::new(jobs))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobCatalog for InMemoryJobCatalog {
    async fn all_jobs(&self) -> Result<Vec<JobRecord>, AppError> {
        Ok(self.jobs.as_ref().clone())
    }

    async fn find_job(&self, job_id: &str) -> Result<Option<JobRecord>, AppError> {
        Ok(self.jobs.iter().find(|j| j.id == job_id).cloned())
    }
}
