pub mod matcher;
pub mod resolver;
pub mod types;

pub use matcher::{best_match, MatchCandidate, MatchKind};
pub use resolver::CommandResolver;
pub use types::{CommandDraft, CommandEntry, CommandPatch};
