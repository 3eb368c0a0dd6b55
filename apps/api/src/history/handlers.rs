use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppPath, AppQuery};
use crate::history::Page;
use crate::models::history::HistoryEntry;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub history: Vec<HistoryEntry>,
}

/// GET /history
pub async fn handle_list_history(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HistoryQuery>,
) -> Result<Json<HistoryListResponse>, AppError> {
    let history = state
        .history
        .list(Page::new(params.limit, params.offset))
        .await?;
    Ok(Json(HistoryListResponse { history }))
}

/// GET /history/:id
pub async fn handle_get_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<HistoryEntry>, AppError> {
    state
        .history
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("History entry {id} not found")))
}

/// DELETE /history/:id
///
/// 204 when removed, 404 when the id is unknown (including a repeated delete).
pub async fn handle_delete_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.history.delete(id).await? {
        return Err(AppError::NotFound(format!("History entry {id} not found")));
    }
    info!("Deleted history entry {id}");
    Ok(StatusCode::NO_CONTENT)
}
