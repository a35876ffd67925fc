//! Axum route handlers for the resume pipeline: upload parsing, scoring,
//! improvement feedback, and cover letter generation.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::extract::extract_text;
use crate::resume::prompts::{
    COVER_LETTER_GENERAL_PROMPT, COVER_LETTER_TAILORED_PROMPT, FEEDBACK_PROMPT, SCORE_PROMPT,
    SKILLS_PROMPT,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub document_id: Uuid,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub parsed_text: String,
    pub resume_score: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/parse
///
/// Accepts a multipart upload (`file`, optional `username`), extracts the
/// text, and persists the record.
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_text(&upload.filename, &upload.data)?;

    let document_id = insert_resume(&state.db, &upload.username, &text, "parsed").await?;

    Ok(Json(ParseResponse { document_id, text }))
}

/// GET /api/v1/resumes?username=
///
/// Returns the most recently persisted resume for a user.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Query(params): Query<UsernameQuery>,
) -> Result<Json<ResumeRow>, AppError> {
    let row: Option<ResumeRow> = sqlx::query_as(
        "SELECT * FROM resumes WHERE username = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(&params.username)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_else(|| {
        AppError::NotFound(format!("No resume found for user '{}'", params.username))
    })?;
    Ok(Json(row))
}

/// POST /api/v1/resumes/score
///
/// Extracts the uploaded resume, asks the LLM for a 1-10 quality evaluation,
/// and persists the parsed text alongside it.
pub async fn handle_score(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ScoreResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let text = extract_text(&upload.filename, &upload.data)?;

    let prompt = SCORE_PROMPT.replace("{resume_text}", &text);
    let evaluation = state
        .llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume scoring failed: {e}")))?;

    insert_resume(&state.db, &upload.username, &text, "scored").await?;

    Ok(Json(ScoreResponse {
        parsed_text: text,
        resume_score: evaluation,
    }))
}

/// POST /api/v1/resumes/feedback
///
/// Returns improvement suggestions for already-extracted resume text.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let prompt = FEEDBACK_PROMPT.replace("{resume_text}", &request.resume_text);
    let feedback = state
        .llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Feedback generation failed: {e}")))?;

    Ok(Json(FeedbackResponse { feedback }))
}

/// POST /api/v1/resumes/cover-letter
///
/// Two-step generation: extract top skills from the resume, then generate a
/// letter tailored to the job description when one is supplied.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let skills_prompt = SKILLS_PROMPT.replace("{resume_text}", &request.resume_text);
    let skills = state
        .llm
        .complete(&skills_prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Skill extraction failed: {e}")))?;

    let job_description = request
        .job_description
        .as_deref()
        .map(str::trim)
        .unwrap_or("");

    let prompt = if job_description.is_empty() {
        COVER_LETTER_GENERAL_PROMPT
            .replace("{resume_text}", &request.resume_text)
            .replace("{skills}", &skills)
    } else {
        COVER_LETTER_TAILORED_PROMPT
            .replace("{resume_text}", &request.resume_text)
            .replace("{job_description}", job_description)
            .replace("{skills}", &skills)
    };

    let cover_letter = state
        .llm
        .complete(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}

// ────────────────────────────────────────────────────────────────────────────
// Upload plumbing and persistence
// ────────────────────────────────────────────────────────────────────────────

struct Upload {
    filename: String,
    data: Bytes,
    username: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut username: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(str::to_string).ok_or_else(|| {
                    AppError::Validation("File field is missing a filename".to_string())
                })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((filename, data));
            }
            Some("username") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read username: {e}")))?;
                username = Some(value);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    Ok(Upload {
        filename,
        data,
        username: username.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| "user".to_string()),
    })
}

async fn insert_resume(
    pool: &sqlx::PgPool,
    username: &str,
    parsed_text: &str,
    kind: &str,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO resumes (id, username, parsed_text, kind, created_at) VALUES ($1, $2, $3, $4, NOW())",
    )
    .bind(id)
    .bind(username)
    .bind(parsed_text)
    .bind(kind)
    .execute(pool)
    .await?;
    Ok(id)
}
