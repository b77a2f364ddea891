use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Carries the readability backend selected at startup (`READABILITY_BACKEND`).
    pub analyzer: ResumeAnalyzer,
    /// Admission gate for extraction + analysis; sized by `max_concurrent_analyses`.
    pub admission: Arc<Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            analyzer: ResumeAnalyzer::new(config.readability_backend.build()),
            admission: Arc::new(Semaphore::new(config.max_concurrent_analyses)),
            config,
        }
    }
}
