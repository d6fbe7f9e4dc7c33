use std::env;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Bounded wait for one interpretation request. There are no retries at
/// this layer.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Generative-backend configuration, read from the environment once at
/// startup and injected into the client (never consulted at call time).
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    /// `None` or empty means no backend is configured; the resolver
    /// short-circuits without a network attempt.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl LlmSettings {
    pub fn from_env() -> Self {
        let base_url = env::var("VOCOMMAND_LLM_BASE_URL")
            .or_else(|_| env::var("OPENAI_BASE_URL"))
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = env::var("VOCOMMAND_LLM_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|value| !value.is_empty());
        let model = env::var("VOCOMMAND_LLM_MODEL")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let timeout_secs = env::var("VOCOMMAND_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            api_key,
            model,
            timeout_secs,
        }
    }

    /// The "is a generative backend configured" check from the spec's
    /// collaborator interfaces.
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> LlmSettings {
        LlmSettings {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.map(str::to_string),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn configured_requires_non_empty_key() {
        assert!(!settings(None).is_configured());
        assert!(!settings(Some("")).is_configured());
        assert!(settings(Some("sk-test")).is_configured());
    }
}
