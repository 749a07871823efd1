//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::TagnoteCommand;
use std::path::{Path, PathBuf};
use tagnote::domain::UlidGenerator;
use tagnote::infra::FileStore;
use tagnote::notebook::Notebook;
use tagnote::store::{CorruptPolicy, KeyValueStore};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// The temp directory holds both the data directory and a private config
/// home, so commands never read the real user's configuration. Everything
/// is cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    data_dir: PathBuf,
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&config_home).expect("Failed to create config home");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_home,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the stored document for `key`.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Writes raw stored documents, as if left by an earlier session.
    pub fn seed(&self, notes: &str, tags: &str) {
        let mut store = FileStore::open(&self.data_dir).expect("Failed to open store");
        store.set("NOTES", notes).expect("Failed to seed notes");
        store.set("TAGS", tags).expect("Failed to seed tags");
    }

    /// Writes a raw value under one key.
    pub fn seed_key(&self, key: &str, value: &str) {
        let mut store = FileStore::open(&self.data_dir).expect("Failed to open store");
        store.set(key, value).expect("Failed to seed key");
    }

    /// Reads the raw stored document for `key`, if any.
    pub fn read_key(&self, key: &str) -> Option<String> {
        let store = FileStore::open(&self.data_dir).expect("Failed to open store");
        store.get(key).expect("Failed to read key")
    }

    /// Writes `config.toml` into the private config home.
    pub fn write_config(&self, contents: &str) {
        let dir = self.config_home.join("tagnote");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.toml"), contents).expect("Failed to write config");
    }

    /// Opens the stored data through the library.
    pub fn notebook(&self) -> Notebook<FileStore> {
        let store = FileStore::open(&self.data_dir).expect("Failed to open store");
        Notebook::open(store, UlidGenerator, CorruptPolicy::Fail).expect("Failed to open notebook")
    }

    /// Creates a TagnoteCommand configured for this test environment.
    pub fn cmd(&self) -> TagnoteCommand {
        self.config_cmd().dir(&self.data_dir)
    }

    /// Creates a TagnoteCommand that only isolates config lookup, leaving
    /// the data directory to the config file or its default.
    pub fn config_cmd(&self) -> TagnoteCommand {
        TagnoteCommand::new().config_home(&self.config_home)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.seed("[]", "[]");
            env.data_dir().to_path_buf()
        };
        assert!(
            !path.exists(),
            "temp directory should be cleaned up on drop"
        );
    }

    #[test]
    fn test_env_seed_writes_documents() {
        let env = TestEnv::new();
        env.seed(crate::common::SAMPLE_NOTES, crate::common::SAMPLE_TAGS);
        assert!(env.key_path("NOTES").exists());
        assert!(env.key_path("TAGS").exists());
        assert_eq!(env.notebook().notes().len(), 2);
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }
}
