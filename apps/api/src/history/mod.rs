//! Recommendation history: append on every successful recommendation,
//! list newest first, delete by id. Entries are never updated in place.
//!
//! `AppState` holds an `Arc<dyn HistoryStore>`: Postgres when `DATABASE_URL`
//! is configured, memory otherwise.

pub mod handlers;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::profile::UserProfile;
use crate::engine::recommender::RecommendationSet;
use crate::errors::AppError;
use crate::models::history::HistoryEntry;

pub use memory::MemoryHistoryStore;
pub use postgres::PgHistoryStore;

pub const DEFAULT_PAGE_LIMIT: u32 = 50;
pub const MAX_PAGE_LIMIT: u32 = 200;

/// A history record before the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
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

impl NewHistoryEntry {
    pub fn from_recommendation(
        profile: &UserProfile,
        result: &RecommendationSet,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            skills: profile.skills().join(", "),
            interests: profile.interests().join(", "),
            career_mode: profile.career_mode().to_string(),
            risk_preference: profile.risk_preference().to_string(),
            primary_career: result.primary_recommendation.career.clone(),
            backup_career: result.backup_recommendation.career.clone(),
            primary_score: result.primary_recommendation.match_score,
            backup_score: result.backup_recommendation.match_score,
            created_at,
        }
    }

    pub fn into_entry(self, id: Uuid) -> HistoryEntry {
        HistoryEntry {
            id,
            skills: self.skills,
            interests: self.interests,
            career_mode: self.career_mode,
            risk_preference: self.risk_preference,
            primary_career: self.primary_career,
            backup_career: self.backup_career,
            primary_score: self.primary_score,
            backup_score: self.backup_score,
            created_at: self.created_at,
        }
    }
}

/// Limit/offset window over the newest-first history list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Page {
    /// Clamps `limit` to [1, MAX_PAGE_LIMIT]; missing values take defaults.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, AppError>;

    /// Newest first.
    async fn list(&self, page: Page) -> Result<Vec<HistoryEntry>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<HistoryEntry>, AppError>;

    /// Returns `false` when no entry had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
