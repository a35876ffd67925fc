use std::sync::Arc;

use sqlx::PgPool;

use crate::jobs::service::JobService;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Job fetcher and its cache store. The store's backing files are owned
    /// exclusively by this service; handlers only read through it.
    pub jobs: Arc<JobService>,
}
