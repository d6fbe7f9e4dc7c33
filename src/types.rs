//! Core action and resolution types shared across the engine.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::command::types::CommandEntry;

/// Upper bound on speakable response text, in characters. Responses are
/// spoken aloud, so the system favors brevity.
pub const RESPONSE_TEXT_LIMIT: usize = 100;

/// Fallback confirmation when the model reply carries no usable text.
pub const DEFAULT_RESPONSE_TEXT: &str = "Done";

/// Browser operations a phrase can resolve to. Closed set; the two
/// synthetic resolver outcomes live in [`ResolvedAction`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Navigate,
    SwitchTab,
    Scroll,
    Read,
    Search,
    Refresh,
    CloseTab,
    NewTab,
    CustomScript,
}

impl ActionType {
    pub const ALL: [ActionType; 9] = [
        ActionType::Navigate,
        ActionType::SwitchTab,
        ActionType::Scroll,
        ActionType::Read,
        ActionType::Search,
        ActionType::Refresh,
        ActionType::CloseTab,
        ActionType::NewTab,
        ActionType::CustomScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Navigate => "navigate",
            ActionType::SwitchTab => "switch_tab",
            ActionType::Scroll => "scroll",
            ActionType::Read => "read",
            ActionType::Search => "search",
            ActionType::Refresh => "refresh",
            ActionType::CloseTab => "close_tab",
            ActionType::NewTab => "new_tab",
            ActionType::CustomScript => "custom_script",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionType::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or(())
    }
}

/// Outcome action of a resolution: either a concrete browser action, or
/// one of the two synthetic outcomes the resolver can produce on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAction {
    Action(ActionType),
    /// Resolution failed; `response_text` carries a short user-facing message.
    Error,
    /// The model replied but its output could not be structurally parsed.
    Processed,
}

impl ResolvedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedAction::Action(action) => action.as_str(),
            ResolvedAction::Error => "error",
            ResolvedAction::Processed => "processed",
        }
    }
}

impl From<ActionType> for ResolvedAction {
    fn from(action: ActionType) -> Self {
        ResolvedAction::Action(action)
    }
}

impl fmt::Display for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolvedAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(ResolvedAction::Error),
            "processed" => Ok(ResolvedAction::Processed),
            other => other.parse::<ActionType>().map(ResolvedAction::Action),
        }
    }
}

impl Serialize for ResolvedAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResolvedAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|_| de::Error::custom(format!("unknown action: {value}")))
    }
}

/// Normalized output of a resolution. Every resolution, however it went,
/// produces exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ResolvedCommand {
    pub action: ResolvedAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Speakable confirmation. Always non-empty, at most
    /// [`RESPONSE_TEXT_LIMIT`] characters.
    pub response_text: String,
    /// Present only when resolution came from the command table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_command_id: Option<Uuid>,
}

impl ResolvedCommand {
    /// Build the MATCHED terminal from a command-table hit.
    pub fn matched(entry: &CommandEntry) -> Self {
        let label = if entry.description.is_empty() {
            &entry.action_target
        } else {
            &entry.description
        };
        Self {
            action: entry.action_type.into(),
            target: Some(entry.action_target.clone()),
            response_text: truncate_spoken(&format!("Executing: {label}")),
            matched_command_id: Some(entry.id),
        }
    }

    /// Build an ERROR terminal with a fixed user-facing message.
    pub fn error(message: &str) -> Self {
        Self {
            action: ResolvedAction::Error,
            target: None,
            response_text: truncate_spoken(message),
            matched_command_id: None,
        }
    }

    /// Build the DEGRADED terminal from an unparseable model reply.
    pub fn processed(raw: &str) -> Self {
        let text = truncate_spoken(raw);
        Self {
            action: ResolvedAction::Processed,
            target: None,
            response_text: if text.is_empty() {
                DEFAULT_RESPONSE_TEXT.to_string()
            } else {
                text
            },
            matched_command_id: None,
        }
    }
}

/// Bound text to [`RESPONSE_TEXT_LIMIT`] characters, respecting char
/// boundaries.
pub fn truncate_spoken(text: &str) -> String {
    text.chars().take(RESPONSE_TEXT_LIMIT).collect()
}
