pub mod memory;
pub mod traits;
pub mod types;

pub use memory::MemoryStore;
pub use traits::{CommandStore, HistoryStore};
pub use types::HistoryRecord;
