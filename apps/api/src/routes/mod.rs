pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as job_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", get(resume_handlers::handle_get_resume))
        .route("/api/v1/resumes/parse", post(resume_handlers::handle_parse))
        .route("/api/v1/resumes/score", post(resume_handlers::handle_score))
        .route(
            "/api/v1/resumes/feedback",
            post(resume_handlers::handle_feedback),
        )
        .route(
            "/api/v1/resumes/cover-letter",
            post(resume_handlers::handle_cover_letter),
        )
        // Jobs API
        .route("/api/v1/jobs/suggest", post(job_handlers::handle_suggest))
        .route("/api/v1/jobs/search", post(job_handlers::handle_search))
        .route("/api/v1/jobs/taxonomy", get(job_handlers::handle_taxonomy))
        .with_state(state)
}
