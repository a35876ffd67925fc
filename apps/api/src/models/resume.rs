use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted resume record. `kind` records which pipeline wrote it:
/// `parsed` for the plain extraction endpoint, `scored` for the scoring one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub username: String,
    pub parsed_text: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}
