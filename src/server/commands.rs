//! Custom-command CRUD endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::command::types::{CommandDraft, CommandEntry, CommandPatch};
use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::types::ActionType;

/// Request payload for creating or fully replacing a custom command.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertCommandRequest {
    pub trigger_phrase: String,
    pub action_type: ActionType,
    pub action_target: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl From<UpsertCommandRequest> for CommandDraft {
    fn from(request: UpsertCommandRequest) -> Self {
        CommandDraft {
            trigger_phrase: request.trigger_phrase,
            action_type: request.action_type,
            action_target: request.action_target,
            description: request.description,
            enabled: request.enabled,
        }
    }
}

/// Request payload for partially updating a command (e.g. toggling
/// `enabled`).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PatchCommandRequest {
    pub trigger_phrase: Option<String>,
    pub action_type: Option<ActionType>,
    pub action_target: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

impl From<PatchCommandRequest> for CommandPatch {
    fn from(request: PatchCommandRequest) -> Self {
        CommandPatch {
            trigger_phrase: request.trigger_phrase,
            action_type: request.action_type,
            action_target: request.action_target,
            description: request.description,
            enabled: request.enabled,
        }
    }
}

/// Response for delete operation.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteCommandResponse {
    pub status: String,
    pub deleted: bool,
}

/// POST /api/custom-commands
pub(crate) async fn create(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<UpsertCommandRequest>,
) -> Result<Json<CommandEntry>, ApiError> {
    let entry = state.commands.create(payload.into()).await?;
    Ok(Json(entry))
}

/// GET /api/custom-commands
pub(crate) async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<CommandEntry>>, ApiError> {
    let entries = state.commands.list().await?;
    Ok(Json(entries))
}

/// GET /api/custom-commands/{id}
pub(crate) async fn get(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommandEntry>, ApiError> {
    let entry = state.commands.get(id).await?;
    Ok(Json(entry))
}

/// PUT /api/custom-commands/{id}
///
/// Full replacement of every mutable field.
pub(crate) async fn update(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpsertCommandRequest>,
) -> Result<Json<CommandEntry>, ApiError> {
    let patch = CommandPatch {
        trigger_phrase: Some(payload.trigger_phrase),
        action_type: Some(payload.action_type),
        action_target: Some(payload.action_target),
        description: Some(payload.description),
        enabled: Some(payload.enabled),
    };
    let entry = state.commands.update(id, patch).await?;
    Ok(Json(entry))
}

/// PATCH /api/custom-commands/{id}
pub(crate) async fn patch(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchCommandRequest>,
) -> Result<Json<CommandEntry>, ApiError> {
    let patch: CommandPatch = payload.into();
    if patch.is_empty() {
        return Err(ApiError::bad_request("no updates provided"));
    }
    let entry = state.commands.update(id, patch).await?;
    Ok(Json(entry))
}

/// DELETE /api/custom-commands/{id}
pub(crate) async fn delete(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteCommandResponse>, ApiError> {
    state.commands.delete(id).await?;
    Ok(Json(DeleteCommandResponse {
        status: "ok".to_string(),
        deleted: true,
    }))
}
