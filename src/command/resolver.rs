//! Phrase resolution: command-table match first, generative fallback
//! second, well-formed result always.

use std::sync::Arc;

use crate::command::matcher;
use crate::llm::interpreter::Interpreter;
use crate::llm::response;
use crate::storage::traits::CommandStore;
use crate::types::ResolvedCommand;

const UNCONFIGURED_MESSAGE: &str = "AI not configured. Add a custom command for this action.";
const FAILURE_MESSAGE: &str = "Command failed.";

/// Orchestrates matcher → interpretation → parsing for one phrase.
///
/// Stateless across calls: the enabled command set is read fresh from the
/// store at the start of every resolution, so concurrent calls never
/// contend on resolver-owned memory. The interpretation call is the only
/// suspension point; dropping the `resolve` future abandons it.
pub struct CommandResolver {
    store: Arc<dyn CommandStore>,
    interpreter: Arc<dyn Interpreter>,
}

impl CommandResolver {
    pub fn new(store: Arc<dyn CommandStore>, interpreter: Arc<dyn Interpreter>) -> Self {
        Self { store, interpreter }
    }

    /// Resolve a phrase into exactly one [`ResolvedCommand`]. Never
    /// fails: every error path terminates in an `error` action with a
    /// short user-facing message, and an unparseable model reply degrades
    /// to a `processed` action carrying the truncated raw text. Failure
    /// detail goes to the log, never into `response_text`.
    pub async fn resolve(&self, phrase: &str, source: &str) -> ResolvedCommand {
        let commands = match self.store.list_enabled().await {
            Ok(commands) => commands,
            Err(error) => {
                tracing::error!(%error, source, "command store read failed");
                return ResolvedCommand::error(FAILURE_MESSAGE);
            }
        };

        if let Some(hit) = matcher::best_match(phrase, &commands) {
            tracing::debug!(
                source,
                kind = ?hit.kind,
                score = hit.score,
                command_id = %hit.entry.id,
                "phrase matched custom command"
            );
            return ResolvedCommand::matched(&hit.entry);
        }

        if !self.interpreter.is_configured() {
            tracing::debug!(source, "no match and no backend configured");
            return ResolvedCommand::error(UNCONFIGURED_MESSAGE);
        }

        let raw = match self.interpreter.interpret(phrase, &commands).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(%error, source, "interpretation failed");
                return ResolvedCommand::error(FAILURE_MESSAGE);
            }
        };

        match response::parse_action(&raw) {
            Ok(parsed) => parsed.into(),
            Err(_) => {
                tracing::debug!(source, reply_len = raw.len(), "degrading unparseable reply");
                ResolvedCommand::processed(&raw)
            }
        }
    }
}
