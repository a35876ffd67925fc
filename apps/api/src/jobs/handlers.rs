//! Axum route handlers for job suggestion, taxonomy-filtered search, and the
//! taxonomy listing itself.

use axum::{extract::State, Json};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::matcher::{rank, DEFAULT_TOP_N};
use crate::jobs::models::{JobSummary, Taxonomy};
use crate::jobs::service::{JOBS_TTL_SECS, TAXONOMY_TTL_SECS};
use crate::resume::keywords::extract_search_terms;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobSummary>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

/// POST /api/v1/jobs/suggest
///
/// Extracts search terms from the resume, ranks the cached corpus against
/// them, and returns the top matches. An empty corpus is a cache-unavailable
/// condition, distinct from a successful response with zero matches.
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<JobsResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let keywords = extract_search_terms(&request.resume_text, &state.llm).await?;
    if keywords.is_empty() {
        return Err(AppError::Extraction(
            "Could not extract search terms from the resume".to_string(),
        ));
    }

    let jobs = state.jobs.get(Duration::seconds(JOBS_TTL_SECS)).await?;
    if jobs.is_empty() {
        return Err(AppError::CacheEmpty);
    }

    let ranked = rank(&jobs, &keywords, DEFAULT_TOP_N);
    Ok(Json(JobsResponse {
        jobs: ranked.iter().map(|r| JobSummary::from(r.job)).collect(),
    }))
}

/// GET /api/v1/jobs/taxonomy
///
/// Returns the cached company-type and industry listings.
pub async fn handle_taxonomy(
    State(state): State<AppState>,
) -> Result<Json<Taxonomy>, AppError> {
    let taxonomy = state
        .jobs
        .taxonomy(Duration::seconds(TAXONOMY_TTL_SECS))
        .await?;
    Ok(Json(taxonomy))
}

/// POST /api/v1/jobs/search
///
/// Filters the cached corpus by company type and industry ids. An absent,
/// empty, or "all" filter matches every listing.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<JobsResponse>, AppError> {
    let jobs = state.jobs.get(Duration::seconds(JOBS_TTL_SECS)).await?;
    if jobs.is_empty() {
        return Err(AppError::CacheEmpty);
    }

    let matches: Vec<JobSummary> = jobs
        .iter()
        .filter(|job| {
            filter_matches(request.company_type.as_deref(), job.company_type_id)
                && filter_matches(request.industry.as_deref(), job.industry_id)
        })
        .map(JobSummary::from)
        .collect();

    Ok(Json(JobsResponse { jobs: matches }))
}

fn filter_matches(filter: Option<&str>, id: Option<i64>) -> bool {
    match filter.map(str::trim) {
        None | Some("") | Some("all") => true,
        Some(value) => value.parse::<i64>().ok() == id && id.is_some(),
    }
}
