//! In-memory store, sufficient for a single-process deployment and for
//! tests. A document store can be substituted behind the same traits.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::command::types::{normalize, CommandDraft, CommandEntry, CommandPatch};
use crate::error::{CoreError, CoreResult};
use crate::storage::traits::{CommandStore, HistoryStore};
use crate::storage::types::HistoryRecord;

#[derive(Default)]
pub struct MemoryStore {
    commands: RwLock<Vec<CommandEntry>>,
    history: RwLock<Vec<HistoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound(format!("command {id}"))
}

#[async_trait]
impl CommandStore for MemoryStore {
    async fn list(&self) -> CoreResult<Vec<CommandEntry>> {
        let commands = self.commands.read().await;
        let mut all: Vec<CommandEntry> = commands.clone();
        all.reverse(); // insertion order, newest first
        Ok(all)
    }

    async fn list_enabled(&self) -> CoreResult<Vec<CommandEntry>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|entry| entry.enabled)
            .collect())
    }

    async fn get(&self, id: Uuid) -> CoreResult<CommandEntry> {
        let commands = self.commands.read().await;
        commands
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: CommandDraft) -> CoreResult<CommandEntry> {
        if normalize(&draft.trigger_phrase).is_empty() {
            return Err(CoreError::InvalidInput(
                "trigger phrase must not be empty".to_string(),
            ));
        }
        let mut entry = CommandEntry::new(draft);
        if entry.description.is_empty() {
            entry.description = format!("{} -> {}", entry.action_type, entry.action_target);
        }
        let mut commands = self.commands.write().await;
        commands.push(entry.clone());
        Ok(entry)
    }

    async fn update(&self, id: Uuid, patch: CommandPatch) -> CoreResult<CommandEntry> {
        let mut commands = self.commands.write().await;
        let entry = commands
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| not_found(id))?;

        if let Some(trigger) = patch.trigger_phrase {
            let trigger = normalize(&trigger);
            if trigger.is_empty() {
                return Err(CoreError::InvalidInput(
                    "trigger phrase must not be empty".to_string(),
                ));
            }
            entry.trigger_phrase = trigger;
        }
        if let Some(action_type) = patch.action_type {
            entry.action_type = action_type;
        }
        if let Some(action_target) = patch.action_target {
            entry.action_target = action_target;
        }
        if let Some(description) = patch.description {
            entry.description = description;
        }
        if let Some(enabled) = patch.enabled {
            entry.enabled = enabled;
        }

        Ok(entry.clone())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<()> {
        let mut commands = self.commands.write().await;
        let before = commands.len();
        commands.retain(|entry| entry.id != id);
        if commands.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, record: HistoryRecord) -> CoreResult<()> {
        let mut history = self.history.write().await;
        history.push(record);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> CoreResult<Vec<HistoryRecord>> {
        let history = self.history.read().await;
        Ok(history.iter().rev().take(limit).cloned().collect())
    }

    async fn clear(&self) -> CoreResult<usize> {
        let mut history = self.history.write().await;
        let cleared = history.len();
        history.clear();
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionType, ResolvedCommand};

    fn draft(trigger: &str) -> CommandDraft {
        CommandDraft {
            trigger_phrase: trigger.to_string(),
            action_type: ActionType::Navigate,
            action_target: "https://example.com".to_string(),
            description: String::new(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn create_normalizes_and_defaults_description() {
        let store = MemoryStore::new();
        let entry = store.create(draft("  Open Example  ")).await.unwrap();
        assert_eq!(entry.trigger_phrase, "open example");
        assert_eq!(entry.description, "navigate -> https://example.com");
    }

    #[tokio::test]
    async fn create_rejects_blank_trigger() {
        let store = MemoryStore::new();
        let result = store.create(draft("   ")).await;
        assert!(matches!(result, Err(CoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn list_enabled_filters_and_orders_newest_first() {
        let store = MemoryStore::new();
        let first = store.create(draft("first")).await.unwrap();
        let second = store.create(draft("second")).await.unwrap();
        store
            .update(
                first.id,
                CommandPatch {
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);

        let enabled = store.list_enabled().await.unwrap();
        assert_eq!(enabled.len(), 1);
        assert_eq!(enabled[0].id, second.id);
    }

    #[tokio::test]
    async fn update_renormalizes_trigger() {
        let store = MemoryStore::new();
        let entry = store.create(draft("first")).await.unwrap();
        let updated = store
            .update(
                entry.id,
                CommandPatch {
                    trigger_phrase: Some("  NEW Trigger ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.trigger_phrase, "new trigger");

        let blank = store
            .update(
                entry.id,
                CommandPatch {
                    trigger_phrase: Some("  ".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(blank, Err(CoreError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id).await, Err(CoreError::NotFound(_))));
        assert!(matches!(store.delete(id).await, Err(CoreError::NotFound(_))));
        assert!(matches!(
            store.update(id, CommandPatch::default()).await,
            Err(CoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn history_is_newest_first_and_clearable() {
        let store = MemoryStore::new();
        for phrase in ["one", "two", "three"] {
            store
                .append(HistoryRecord::new(
                    phrase,
                    "text",
                    ResolvedCommand::error("Command failed."),
                ))
                .await
                .unwrap();
        }

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].phrase, "three");
        assert_eq!(recent[1].phrase, "two");

        assert_eq!(store.clear().await.unwrap(), 3);
        assert!(store.recent(10).await.unwrap().is_empty());
    }
}
