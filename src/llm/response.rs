//! Tolerant extraction of a structured action from a raw model reply.

use std::fmt;

use serde::Deserialize;

use crate::types::{ResolvedAction, ResolvedCommand, DEFAULT_RESPONSE_TEXT};

/// The reply did not contain a decodable structured payload. The resolver
/// treats this as "use whatever raw text is available", not a hard
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedResponse;

impl fmt::Display for MalformedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response contained no decodable action payload")
    }
}

impl std::error::Error for MalformedResponse {}

/// A structurally valid action extracted from a model reply. Every field
/// was validated or defaulted independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedAction {
    pub action: ResolvedAction,
    pub target: Option<String>,
    pub response_text: String,
}

impl From<ParsedAction> for ResolvedCommand {
    fn from(parsed: ParsedAction) -> Self {
        ResolvedCommand {
            action: parsed.action,
            target: parsed.target,
            response_text: crate::types::truncate_spoken(&parsed.response_text),
            matched_command_id: None,
        }
    }
}

/// Loose wire shape; the model is not guaranteed to use one field
/// spelling, so both seen variants are accepted.
#[derive(Deserialize)]
struct RawAction {
    #[serde(alias = "action_type")]
    action: Option<String>,
    #[serde(alias = "target_tab")]
    target: Option<String>,
    response_text: Option<String>,
}

/// Extract and validate a [`ParsedAction`] from raw model output.
///
/// The reply may wrap a JSON object in explanatory prose; the span from
/// the first `{` to the last `}` is decoded. The `action` field must be
/// present and inside the known enumeration, otherwise the reply counts
/// as malformed. A missing `response_text` defaults to `"Done"`.
pub fn parse_action(raw: &str) -> Result<ParsedAction, MalformedResponse> {
    let start = raw.find('{').ok_or(MalformedResponse)?;
    let end = raw.rfind('}').ok_or(MalformedResponse)?;
    if start >= end {
        return Err(MalformedResponse);
    }

    let decoded: RawAction =
        serde_json::from_str(&raw[start..=end]).map_err(|_| MalformedResponse)?;

    let action = decoded
        .action
        .as_deref()
        .and_then(|value| value.parse::<ResolvedAction>().ok())
        .ok_or(MalformedResponse)?;

    Ok(ParsedAction {
        action,
        target: decoded.target.filter(|value| !value.is_empty()),
        response_text: decoded
            .response_text
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_RESPONSE_TEXT.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionType;

    #[test]
    fn parses_pure_json() {
        let parsed = parse_action(
            r#"{"action":"scroll","target":"down","response_text":"Scrolling down"}"#,
        )
        .unwrap();
        assert_eq!(parsed.action, ResolvedAction::Action(ActionType::Scroll));
        assert_eq!(parsed.target.as_deref(), Some("down"));
        assert_eq!(parsed.response_text, "Scrolling down");
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let raw = r#"Here you go: {"action":"scroll","target_tab":"down","response_text":"Scrolling down"} Hope that helps!"#;
        let parsed = parse_action(raw).unwrap();
        assert_eq!(parsed.action, ResolvedAction::Action(ActionType::Scroll));
        assert_eq!(parsed.target.as_deref(), Some("down"));
    }

    #[test]
    fn accepts_both_field_spellings() {
        let via_action_type =
            parse_action(r#"{"action_type":"refresh","response_text":"Refreshing"}"#).unwrap();
        assert_eq!(
            via_action_type.action,
            ResolvedAction::Action(ActionType::Refresh)
        );

        let via_target_tab =
            parse_action(r#"{"action":"switch_tab","target_tab":"Jira"}"#).unwrap();
        assert_eq!(via_target_tab.target.as_deref(), Some("Jira"));
    }

    #[test]
    fn defaults_missing_response_text() {
        let parsed = parse_action(r#"{"action":"refresh"}"#).unwrap();
        assert_eq!(parsed.response_text, DEFAULT_RESPONSE_TEXT);
        assert_eq!(parsed.target, None);

        let empty_text = parse_action(r#"{"action":"refresh","response_text":""}"#).unwrap();
        assert_eq!(empty_text.response_text, DEFAULT_RESPONSE_TEXT);
    }

    #[test]
    fn null_and_empty_targets_are_absent() {
        let null = parse_action(r#"{"action":"refresh","target":null}"#).unwrap();
        assert_eq!(null.target, None);
        let empty = parse_action(r#"{"action":"refresh","target":""}"#).unwrap();
        assert_eq!(empty.target, None);
    }

    #[test]
    fn plain_prose_is_malformed() {
        assert_eq!(
            parse_action("Sorry, I can't help with that."),
            Err(MalformedResponse)
        );
    }

    #[test]
    fn reversed_braces_are_malformed() {
        assert_eq!(parse_action("} nothing here {"), Err(MalformedResponse));
        assert_eq!(parse_action("{}"), Err(MalformedResponse)); // no action field either way
    }

    #[test]
    fn broken_json_is_malformed() {
        assert_eq!(
            parse_action(r#"{"action":"scroll", "target": "#),
            Err(MalformedResponse)
        );
    }

    #[test]
    fn missing_action_is_malformed() {
        assert_eq!(
            parse_action(r#"{"response_text":"hello"}"#),
            Err(MalformedResponse)
        );
    }

    #[test]
    fn unknown_action_is_malformed() {
        assert_eq!(
            parse_action(r#"{"action":"teleport","response_text":"zap"}"#),
            Err(MalformedResponse)
        );
    }

    #[test]
    fn long_parsed_response_text_is_bounded() {
        let long = "x".repeat(300);
        let parsed = parse_action(&format!(
            r#"{{"action":"read","response_text":"{long}"}}"#
        ))
        .unwrap();
        let resolved: ResolvedCommand = parsed.into();
        assert_eq!(
            resolved.response_text.chars().count(),
            crate::types::RESPONSE_TEXT_LIMIT
        );
    }
}
