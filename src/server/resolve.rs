//! Command submission and history endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::storage::types::HistoryRecord;
use crate::types::{ResolvedAction, ResolvedCommand};

const DEFAULT_HISTORY_LIMIT: usize = 20;
const MAX_HISTORY_LIMIT: usize = 100;

/// Request payload for submitting a phrase.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommandRequest {
    /// The spoken or typed phrase.
    pub command: String,
    /// Where the phrase came from. Defaults to `voice`.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "voice".to_string()
}

/// Wire shape of one resolution.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommandResponse {
    pub id: Uuid,
    pub original_command: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub response_text: String,
    /// `"error"` iff `action` is `error`, else `"success"`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_command_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl CommandResponse {
    fn from_record(record: &HistoryRecord) -> Self {
        let ResolvedCommand {
            action,
            target,
            response_text,
            matched_command_id,
        } = record.resolved.clone();
        Self {
            id: record.id,
            original_command: record.phrase.clone(),
            action: action.as_str().to_string(),
            target,
            response_text,
            status: if action == ResolvedAction::Error {
                "error".to_string()
            } else {
                "success".to_string()
            },
            matched_command_id,
            timestamp: record.timestamp,
        }
    }
}

/// POST /api/command
///
/// Resolves a phrase and records the outcome in history.
pub(crate) async fn submit(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let resolved = state.resolver.resolve(&payload.command, &payload.source).await;
    let record = HistoryRecord::new(&payload.command, &payload.source, resolved);
    let response = CommandResponse::from_record(&record);

    // The resolution already succeeded; a history write failure is logged
    // rather than surfaced.
    if let Err(error) = state.history.append(record).await {
        tracing::warn!(%error, "failed to record command history");
    }

    Ok(Json(response))
}

/// Query parameters for listing history.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// GET /api/history
pub(crate) async fn history(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let records = state.history.recent(limit).await?;
    Ok(Json(records))
}

/// Response for clearing history.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClearHistoryResponse {
    pub cleared: usize,
}

/// DELETE /api/history
pub(crate) async fn clear_history(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ClearHistoryResponse>, ApiError> {
    let cleared = state.history.clear().await?;
    Ok(Json(ClearHistoryResponse { cleared }))
}
