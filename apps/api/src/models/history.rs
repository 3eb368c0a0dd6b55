use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One stored recommendation request and its outcome.
/// `skills` and `interests` are the normalized request values joined with ", ".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub skills: String,
    pub interests: String,
    pub career_mode: String,
    pub risk_preference: String,
    pub primary_career: String,
    pub backup_career: String,
    pub primary_score: f64,
    pub backup_score: f64,
    pub created_at: DateTime<Utc>,
}
