use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ResolvedCommand;

/// One past resolution, recorded by the HTTP layer after the resolver
/// returns (the engine itself never writes history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    /// The phrase exactly as submitted.
    pub phrase: String,
    /// Where the phrase came from, e.g. `voice` or `text`.
    pub source: String,
    pub resolved: ResolvedCommand,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(phrase: &str, source: &str, resolved: ResolvedCommand) -> Self {
        Self {
            id: Uuid::new_v4(),
            phrase: phrase.to_string(),
            source: source.to_string(),
            resolved,
            timestamp: Utc::now(),
        }
    }
}
