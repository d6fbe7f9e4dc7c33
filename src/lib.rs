pub mod server;

pub mod error;
pub mod types;

pub mod command;
pub mod llm;
pub mod storage;

pub use crate::command::resolver::CommandResolver;
pub use crate::error::{CoreError, CoreResult};
pub use crate::types::{ActionType, ResolvedAction, ResolvedCommand};
