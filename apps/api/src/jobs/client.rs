//! Upstream job-source client.
//!
//! The upstream API has no per-keyword search, so the only read is the
//! unfiltered corpus (plus the two taxonomy listings). Non-success statuses
//! surface as `AppError::Upstream`; there is no automatic retry — the cache
//! layer above decides when to call again.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::jobs::models::{CompanyType, Industry, JobListing, JobsEnvelope};

/// Read-only view of the upstream job source.
/// Held as `Arc<dyn JobSource>` so tests can substitute a stub.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<JobListing>, AppError>;
    async fn fetch_company_types(&self) -> Result<Vec<CompanyType>, AppError>;
    async fn fetch_industries(&self) -> Result<Vec<Industry>, AppError>;
}

pub struct HttpJobSource {
    client: Client,
    base_url: String,
}

impl HttpJobSource {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{path}", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET /{path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "GET /{path} returned status {status}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("GET /{path} returned invalid JSON: {e}")))
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch_jobs(&self) -> Result<Vec<JobListing>, AppError> {
        let envelope: JobsEnvelope = self.get_json("jobs").await?;
        Ok(envelope.results)
    }

    async fn fetch_company_types(&self) -> Result<Vec<CompanyType>, AppError> {
        self.get_json("companytypes").await
    }

    async fn fetch_industries(&self) -> Result<Vec<Industry>, AppError> {
        self.get_json("industries").await
    }
}
