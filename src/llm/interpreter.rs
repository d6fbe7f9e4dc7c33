use std::fmt;

use async_trait::async_trait;

use crate::command::types::CommandEntry;

/// Failure kinds of one interpretation attempt. None of these reach the
/// end caller; the resolver maps them all to its error terminal.
#[derive(Debug, Clone)]
pub enum InterpretError {
    /// No credential/endpoint configured. Detected before any network
    /// attempt.
    Unavailable,
    /// The bounded wait elapsed.
    Timeout,
    /// The service answered with an error or the transport failed.
    Upstream(String),
}

impl fmt::Display for InterpretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpretError::Unavailable => write!(f, "no generative backend configured"),
            InterpretError::Timeout => write!(f, "interpretation timed out"),
            InterpretError::Upstream(msg) => write!(f, "upstream failure: {msg}"),
        }
    }
}

impl std::error::Error for InterpretError {}

/// Seam for the generative-text collaborator. Exactly one request per
/// `interpret` call; retries are caller policy. Implementations must be
/// cancellable by dropping the returned future.
#[async_trait]
pub trait Interpreter: Send + Sync {
    fn is_configured(&self) -> bool;

    /// Interpret a free-form phrase given the user's existing commands as
    /// context. Returns the raw text payload unmodified; structured
    /// extraction is the response parser's job.
    async fn interpret(
        &self,
        phrase: &str,
        commands: &[CommandEntry],
    ) -> Result<String, InterpretError>;
}
