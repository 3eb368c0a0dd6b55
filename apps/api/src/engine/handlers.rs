//! Axum route handler for the recommendation endpoint.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::engine::profile::UserProfile;
use crate::engine::recommender::RecommendationSet;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::history::NewHistoryEntry;
use crate::state::AppState;

/// Raw request body. Fields default to empty so a missing field surfaces as
/// a validation error naming it rather than a generic body rejection.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub career_mode: String,
    #[serde(default)]
    pub risk_preference: String,
}

impl TryFrom<RecommendRequest> for UserProfile {
    type Error = AppError;

    fn try_from(req: RecommendRequest) -> Result<Self, Self::Error> {
        Ok(UserProfile::parse(
            &req.skills,
            &req.interests,
            &req.career_mode,
            &req.risk_preference,
        )?)
    }
}

/// POST /recommend
///
/// Scores the catalog for the submitted profile, records the outcome in
/// history, and returns the primary and backup recommendations.
pub async fn handle_recommend(
    State(state): State<AppState>,
    AppJson(request): AppJson<RecommendRequest>,
) -> Result<Json<RecommendationSet>, AppError> {
    let profile = UserProfile::try_from(request)?;
    let result = state.recommender.recommend(&profile)?;

    info!(
        "Recommended {} ({}) / {} ({}) for mode={} risk={}",
        result.primary_recommendation.career,
        result.primary_recommendation.match_score,
        result.backup_recommendation.career,
        result.backup_recommendation.match_score,
        profile.career_mode(),
        profile.risk_preference(),
    );

    state
        .history
        .append(NewHistoryEntry::from_recommendation(
            &profile,
            &result,
            Utc::now(),
        ))
        .await?;

    Ok(Json(result))
}
