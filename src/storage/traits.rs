//! Persistence seams. The engine reads commands through [`CommandStore`];
//! everything else is caller territory.

use async_trait::async_trait;
use uuid::Uuid;

use crate::command::types::{CommandDraft, CommandEntry, CommandPatch};
use crate::error::CoreResult;
use crate::storage::types::HistoryRecord;

/// Store of user-defined commands. The resolver only ever calls
/// [`CommandStore::list_enabled`]; the rest backs the CRUD surface.
#[async_trait]
pub trait CommandStore: Send + Sync {
    /// All commands, newest first.
    async fn list(&self) -> CoreResult<Vec<CommandEntry>>;

    /// Only `enabled == true` entries, newest first. This is the
    /// resolver's read-only view of the command table.
    async fn list_enabled(&self) -> CoreResult<Vec<CommandEntry>>;

    async fn get(&self, id: Uuid) -> CoreResult<CommandEntry>;

    /// Create an entry. The trigger is normalized; an empty normalized
    /// trigger is rejected with `InvalidInput` (the matcher relies on
    /// triggers being non-empty). An empty description defaults to
    /// `"{action_type} -> {action_target}"`.
    async fn create(&self, draft: CommandDraft) -> CoreResult<CommandEntry>;

    /// Apply a partial update. A changed trigger is re-normalized and
    /// re-validated.
    async fn update(&self, id: Uuid, patch: CommandPatch) -> CoreResult<CommandEntry>;

    async fn delete(&self, id: Uuid) -> CoreResult<()>;
}

/// Store of past resolutions.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, record: HistoryRecord) -> CoreResult<()>;

    /// Most recent records, newest first.
    async fn recent(&self, limit: usize) -> CoreResult<Vec<HistoryRecord>>;

    /// Remove all records, returning how many were removed.
    async fn clear(&self) -> CoreResult<usize>;
}
