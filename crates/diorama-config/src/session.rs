//! Key-value session store backing the settings UI.
//!
//! Each key is one JSON document in its own file under the store directory.

use std::path::{Path, PathBuf};

use crate::config::DioramaConfig;
use crate::error::ConfigError;

/// Key the diorama settings are stored under.
pub const SESSION_KEY: &str = "dioramaOptions";

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<config dir>/diorama/session`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSessionDir`] when the platform has no config
    /// directory.
    pub fn open_default() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoSessionDir)?;
        Ok(Self::new(base.join("diorama").join("session")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Raw value under `key`, `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read.
    pub fn load(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(ConfigError::Read)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Write`] if the directory or file cannot be written.
    pub fn save(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir).map_err(ConfigError::Write)?;
        std::fs::write(self.path_for(key), value).map_err(ConfigError::Write)
    }

    /// Stored settings merged over the defaults. A missing entry yields the
    /// defaults; a malformed one logs a warning and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] on I/O failure only.
    pub fn load_config(&self) -> Result<DioramaConfig, ConfigError> {
        match self.load(SESSION_KEY)? {
            Some(text) => {
                tracing::info!(path = %self.path_for(SESSION_KEY).display(), "loaded diorama config");
                Ok(DioramaConfig::from_json_or_default(&text))
            }
            None => Ok(DioramaConfig::default()),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] or [`ConfigError::Write`].
    pub fn save_config(&self, config: &DioramaConfig) -> Result<(), ConfigError> {
        self.save(SESSION_KEY, &config.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_terrain::Seed;

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load("nothing").unwrap().is_none());
        assert_eq!(store.load_config().unwrap(), DioramaConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested"));
        let mut config = DioramaConfig::default();
        config.seed = Seed::Number(2655);
        config.bounds.x = 64.0;
        config.biome.name = "desert".into();

        store.save_config(&config).unwrap();
        assert!(store.dir().join("dioramaOptions.json").exists());
        assert_eq!(store.load_config().unwrap(), config);
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store.save(SESSION_KEY, "{{broken").unwrap();
        assert_eq!(store.load_config().unwrap(), DioramaConfig::default());
    }
}
