pub mod client;
pub mod interpreter;
pub mod response;
pub mod settings;

pub use client::LlmInterpreter;
pub use interpreter::{InterpretError, Interpreter};
pub use response::{parse_action, MalformedResponse, ParsedAction};
pub use settings::LlmSettings;
