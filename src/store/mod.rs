//! Persistent store adapter: key/value stores and typed JSON values

mod kv;
mod persisted;

pub use kv::{KeyValueStore, MemoryStore, StoreError, StoreResult};
pub use persisted::{CorruptPolicy, Persisted, QUARANTINE_SUFFIX};
