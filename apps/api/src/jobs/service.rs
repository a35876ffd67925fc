//! Job Fetcher — read-through caching over the upstream job source.
//!
//! The entire unfiltered corpus is a single cache unit: the upstream cannot
//! filter by keyword, so it is fetched once per TTL window and all ranking
//! happens locally against the cached set.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::cache::CacheStore;
use crate::jobs::client::JobSource;
use crate::jobs::models::{JobListing, Taxonomy};

pub const JOBS_NAMESPACE: &str = "jobs";
pub const UNFILTERED_JOBS_KEY: &str = "unfiltered_jobs";
pub const COMPANIES_NAMESPACE: &str = "companies";
pub const TAXONOMY_KEY: &str = "company_industry_data";

pub const JOBS_TTL_SECS: i64 = 3600;
pub const TAXONOMY_TTL_SECS: i64 = 86_400;

pub struct JobService {
    source: Arc<dyn JobSource>,
    cache: CacheStore,
}

impl JobService {
    pub fn new(source: Arc<dyn JobSource>, cache: CacheStore) -> Self {
        Self { source, cache }
    }

    /// Explicit startup warm-up, replacing any fetch-at-import behavior.
    /// A failed first fetch is logged and the service starts with a cold
    /// cache; the corpus is reconstructible on the next read.
    pub async fn initialize(&self) {
        if let Err(e) = self.get(Duration::seconds(JOBS_TTL_SECS)).await {
            warn!("Job cache warm-up failed, starting cold: {e}");
        }
        if let Err(e) = self.taxonomy(Duration::seconds(TAXONOMY_TTL_SECS)).await {
            warn!("Taxonomy cache warm-up failed, starting cold: {e}");
        }
    }

    /// Returns the cached corpus if valid under `ttl`; otherwise evicts the
    /// stale entry and fetches a fresh one.
    pub async fn get(&self, ttl: Duration) -> Result<Vec<JobListing>, AppError> {
        if let Some(payload) = self.cache.get_valid(JOBS_NAMESPACE, UNFILTERED_JOBS_KEY, ttl) {
            match serde_json::from_value::<Vec<JobListing>>(payload) {
                Ok(jobs) => return Ok(jobs),
                Err(e) => warn!("Discarding undecodable job cache entry: {e}"),
            }
        }

        if let Err(e) = self.cache.evict(JOBS_NAMESPACE, UNFILTERED_JOBS_KEY) {
            warn!("Failed to evict stale job cache entry: {e}");
        }
        self.fetch_all().await
    }

    /// Fetches the full unfiltered corpus from upstream and stores it with
    /// the current timestamp. Fails on non-success upstream status.
    pub async fn fetch_all(&self) -> Result<Vec<JobListing>, AppError> {
        let jobs = self.source.fetch_jobs().await?;
        info!("Fetched {} job listings from upstream", jobs.len());

        let payload = serde_json::to_value(&jobs)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("job corpus not serializable: {e}")))?;
        if let Err(e) = self.cache.put(JOBS_NAMESPACE, UNFILTERED_JOBS_KEY, payload) {
            // In-memory cache is already updated; losing the disk backstop
            // only costs a re-fetch after restart.
            warn!("Failed to persist job cache: {e}");
        }

        Ok(jobs)
    }

    /// Read-through accessor for the company-type/industry taxonomies,
    /// cached as one unit under a longer TTL.
    pub async fn taxonomy(&self, ttl: Duration) -> Result<Taxonomy, AppError> {
        if let Some(payload) = self.cache.get_valid(COMPANIES_NAMESPACE, TAXONOMY_KEY, ttl) {
            match serde_json::from_value::<Taxonomy>(payload) {
                Ok(taxonomy) => return Ok(taxonomy),
                Err(e) => warn!("Discarding undecodable taxonomy cache entry: {e}"),
            }
        }

        if let Err(e) = self.cache.evict(COMPANIES_NAMESPACE, TAXONOMY_KEY) {
            warn!("Failed to evict stale taxonomy cache entry: {e}");
        }

        let taxonomy = Taxonomy {
            company_types: self.source.fetch_company_types().await?,
            industries: self.source.fetch_industries().await?,
        };

        let payload = serde_json::to_value(&taxonomy)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("taxonomy not serializable: {e}")))?;
        if let Err(e) = self.cache.put(COMPANIES_NAMESPACE, TAXONOMY_KEY, payload) {
            warn!("Failed to persist taxonomy cache: {e}");
        }

        Ok(taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::models::{CompanyType, Industry};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct StubSource {
        jobs: Vec<JobListing>,
        job_calls: AtomicUsize,
    }

    impl StubSource {
        fn with_titles(titles: &[&str]) -> Self {
            Self {
                jobs: titles
                    .iter()
                    .map(|t| JobListing {
                        title: t.to_string(),
                        ..Default::default()
                    })
                    .collect(),
                job_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JobSource for StubSource {
        async fn fetch_jobs(&self) -> Result<Vec<JobListing>, AppError> {
            self.job_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.jobs.clone())
        }

        async fn fetch_company_types(&self) -> Result<Vec<CompanyType>, AppError> {
            Ok(vec![CompanyType {
                id: 1,
                name: "Startup".to_string(),
            }])
        }

        async fn fetch_industries(&self) -> Result<Vec<Industry>, AppError> {
            Ok(vec![Industry {
                id: 7,
                name: "Fintech".to_string(),
            }])
        }
    }

    struct DownSource;

    #[async_trait]
    impl JobSource for DownSource {
        async fn fetch_jobs(&self) -> Result<Vec<JobListing>, AppError> {
            Err(AppError::Upstream("GET /jobs returned status 503".to_string()))
        }

        async fn fetch_company_types(&self) -> Result<Vec<CompanyType>, AppError> {
            Err(AppError::Upstream("GET /companytypes returned status 503".to_string()))
        }

        async fn fetch_industries(&self) -> Result<Vec<Industry>, AppError> {
            Err(AppError::Upstream("GET /industries returned status 503".to_string()))
        }
    }

    fn service_with(source: Arc<dyn JobSource>) -> (JobService, TempDir) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let service = JobService::new(source, CacheStore::new(dir.path()));
        (service, dir)
    }

    #[tokio::test]
    async fn test_cold_cache_fetches_once_then_serves_cached() {
        let source = Arc::new(StubSource::with_titles(&["Backend Engineer"]));
        let (service, _dir) = service_with(source.clone());

        let ttl = Duration::seconds(JOBS_TTL_SECS);
        let first = service.get(ttl).await.unwrap();
        let second = service.get(ttl).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second[0].title, "Backend Engineer");
        assert_eq!(source.job_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_triggers_exactly_one_refetch() {
        let source = Arc::new(StubSource::with_titles(&["Data Scientist"]));
        let (service, _dir) = service_with(source.clone());

        // Seed an entry fetched well past the TTL window.
        let stale = serde_json::to_value(&source.jobs).unwrap();
        service
            .cache
            .put_at(
                JOBS_NAMESPACE,
                UNFILTERED_JOBS_KEY,
                stale,
                Utc::now() - Duration::seconds(JOBS_TTL_SECS + 60),
            )
            .unwrap();

        let ttl = Duration::seconds(JOBS_TTL_SECS);
        let jobs = service.get(ttl).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(source.job_calls.load(Ordering::SeqCst), 1);
        // The cache now carries a fresh timestamp.
        assert!(service
            .cache
            .get_valid(JOBS_NAMESPACE, UNFILTERED_JOBS_KEY, ttl)
            .is_some());
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_when_cache_is_cold() {
        let (service, _dir) = service_with(Arc::new(DownSource));

        let result = service.get(Duration::seconds(JOBS_TTL_SECS)).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn test_valid_cache_shields_a_down_upstream() {
        let stub = Arc::new(StubSource::with_titles(&["Senior Backend Lead"]));
        let dir = TempDir::new().unwrap();

        // Warm the cache with a healthy source, then swap in a failing one
        // over the same directory.
        let warm = JobService::new(stub, CacheStore::new(dir.path()));
        warm.get(Duration::seconds(JOBS_TTL_SECS)).await.unwrap();

        let cold = JobService::new(Arc::new(DownSource), CacheStore::new(dir.path()));
        let jobs = cold.get(Duration::seconds(JOBS_TTL_SECS)).await.unwrap();
        assert_eq!(jobs[0].title, "Senior Backend Lead");
    }

    #[tokio::test]
    async fn test_taxonomy_caches_both_listings_as_one_unit() {
        let source = Arc::new(StubSource::with_titles(&[]));
        let (service, _dir) = service_with(source);

        let ttl = Duration::seconds(TAXONOMY_TTL_SECS);
        let taxonomy = service.taxonomy(ttl).await.unwrap();
        assert_eq!(taxonomy.company_types[0].name, "Startup");
        assert_eq!(taxonomy.industries[0].name, "Fintech");

        assert!(service
            .cache
            .get_valid(COMPANIES_NAMESPACE, TAXONOMY_KEY, ttl)
            .is_some());
    }

    #[tokio::test]
    async fn test_initialize_tolerates_a_down_upstream() {
        let (service, _dir) = service_with(Arc::new(DownSource));
        // Must not panic or error; startup proceeds with a cold cache.
        service.initialize().await;
    }
}
