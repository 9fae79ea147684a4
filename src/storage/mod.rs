pub mod history;
pub mod kv;

pub use history::{SearchHistory, HISTORY_KEY, MAX_HISTORY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
