//! OpenAI-compatible chat client backing the [`Interpreter`] seam.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::command::types::CommandEntry;
use crate::error::{CoreError, CoreResult};
use crate::llm::interpreter::{InterpretError, Interpreter};
use crate::llm::settings::LlmSettings;
use crate::types::ActionType;

const ROLE_PROMPT: &str = "You are a voice-controlled browser assistant.";

/// Interpreter over an OpenAI-compatible `chat/completions` endpoint.
///
/// The request timeout is set on the underlying client from
/// [`LlmSettings::timeout_secs`]; dropping the `interpret` future aborts
/// the in-flight request.
pub struct LlmInterpreter {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl LlmInterpreter {
    pub fn new(settings: LlmSettings) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|error| CoreError::Internal(error.to_string()))?;
        Ok(Self { http, settings })
    }
}

#[async_trait]
impl Interpreter for LlmInterpreter {
    fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    async fn interpret(
        &self,
        phrase: &str,
        commands: &[CommandEntry],
    ) -> Result<String, InterpretError> {
        let Some(api_key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) else {
            return Err(InterpretError::Unavailable);
        };

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: instructions(commands),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Voice command: \"{phrase}\""),
                },
            ],
        };

        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));
        tracing::debug!(model = %self.settings.model, "sending interpretation request");

        let response = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?
            .error_for_status()
            .map_err(map_transport_error)?;

        let completion: ChatResponse = response.json().await.map_err(map_transport_error)?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| InterpretError::Upstream("empty completion".to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> InterpretError {
    if error.is_timeout() {
        InterpretError::Timeout
    } else {
        InterpretError::Upstream(error.to_string())
    }
}

/// Build the fixed instruction block: role, valid actions, the user's
/// existing commands, and the expected reply shape.
fn instructions(commands: &[CommandEntry]) -> String {
    let actions = ActionType::ALL
        .iter()
        .map(|action| action.as_str())
        .collect::<Vec<_>>()
        .join("|");

    let command_lines = if commands.is_empty() {
        "No custom commands configured yet.".to_string()
    } else {
        commands
            .iter()
            .map(|entry| {
                format!(
                    "- \"{}\" -> {}: {}",
                    entry.trigger_phrase, entry.action_type, entry.action_target
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "{ROLE_PROMPT}\n\n\
         User's custom commands:\n{command_lines}\n\n\
         Interpret the voice command and respond in JSON:\n\
         {{\n    \"action\": \"{actions}\",\n    \"target\": \"tab name, URL or null\",\n    \"response_text\": \"brief spoken confirmation\"\n}}\n\n\
         Keep responses very brief - they will be spoken aloud."
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::types::CommandDraft;
    use crate::llm::settings::DEFAULT_TIMEOUT_SECS;

    fn entry(trigger: &str, action: ActionType, target: &str) -> CommandEntry {
        CommandEntry::new(CommandDraft {
            trigger_phrase: trigger.to_string(),
            action_type: action,
            action_target: target.to_string(),
            description: String::new(),
            enabled: true,
        })
    }

    #[test]
    fn instructions_list_every_action() {
        let block = instructions(&[]);
        for action in ActionType::ALL {
            assert!(block.contains(action.as_str()), "missing {action}");
        }
    }

    #[test]
    fn instructions_render_commands_as_context_lines() {
        let commands = vec![
            entry("open github", ActionType::Navigate, "https://github.com"),
            entry("work tab", ActionType::SwitchTab, "Jira"),
        ];
        let block = instructions(&commands);
        assert!(block.contains("- \"open github\" -> navigate: https://github.com"));
        assert!(block.contains("- \"work tab\" -> switch_tab: Jira"));
        assert!(!block.contains("No custom commands configured yet."));
    }

    #[test]
    fn instructions_placeholder_when_no_commands() {
        let block = instructions(&[]);
        assert!(block.contains("No custom commands configured yet."));
    }

    #[tokio::test]
    async fn unconfigured_client_fails_before_any_network_attempt() {
        let client = LlmInterpreter::new(LlmSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: None,
            model: "test".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
        .unwrap();

        assert!(!client.is_configured());
        let result = client.interpret("scroll down", &[]).await;
        assert!(matches!(result, Err(InterpretError::Unavailable)));
    }
}
