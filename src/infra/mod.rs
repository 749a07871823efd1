//! File-backed storage and logging setup

mod file_store;
mod logging;

pub use file_store::FileStore;
pub use logging::init_tracing;
