//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, seeding of stored documents,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::TagnoteCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
