//! Configuration storage for persisted simulator settings.
//!
//! Provides centralized storage for small user settings such as the viewer
//! zoom level. All config is stored in ~/.telescope_sim/ by default, with
//! scalar settings kept as string values in a single `settings.json` map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration storage manager for simulator settings.
///
/// Manages loading and saving of key-value settings from a centralized
/// directory (defaults to ~/.telescope_sim/).
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    /// Root directory for all configuration (e.g., ~/.telescope_sim)
    root_path: PathBuf,
}

impl ConfigStorage {
    /// Create a new config storage with default path (~/.telescope_sim)
    pub fn new() -> std::io::Result<Self> {
        let home = std::env::var("HOME")
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::NotFound, "HOME not set"))?;
        let root_path = PathBuf::from(home).join(".telescope_sim");
        Ok(Self { root_path })
    }

    /// Create a new config storage with custom root path
    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Get the root configuration path
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Get the settings file path
    fn settings_path(&self) -> PathBuf {
        self.root_path.join("settings.json")
    }

    fn load_settings(&self) -> std::io::Result<BTreeMap<String, String>> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    fn store_settings(&self, settings: &BTreeMap<String, String>) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.root_path)?;

        let path = self.settings_path();
        let contents = serde_json::to_string_pretty(settings)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Get a stored setting value.
    ///
    /// Returns None if no value exists for this key.
    /// Returns Some(Err) if the settings file exists but cannot be loaded.
    pub fn get_value(&self, key: &str) -> Option<Result<String, std::io::Error>> {
        match self.load_settings() {
            Ok(mut settings) => settings.remove(key).map(Ok),
            Err(e) => Some(Err(e)),
        }
    }

    /// Save a setting value, replacing any previous value for the key.
    ///
    /// Creates the config directory if it doesn't exist.
    /// Returns the path of the settings file.
    pub fn set_value(&self, key: &str, value: &str) -> std::io::Result<PathBuf> {
        let mut settings = self.load_settings()?;
        settings.insert(key.to_string(), value.to_string());
        self.store_settings(&settings)
    }
}

impl Default for ConfigStorage {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_path(PathBuf::from(".telescope_sim")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> (tempfile::TempDir, ConfigStorage) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = ConfigStorage::with_path(temp_dir.path().join("config"));
        (temp_dir, storage)
    }

    #[test]
    fn test_config_storage_creation() {
        let (_dir, storage) = create_test_storage();
        assert!(storage.root_path().to_str().is_some());
        assert!(storage.settings_path().ends_with("settings.json"));
    }

    #[test]
    fn test_get_missing_value() {
        let (_dir, storage) = create_test_storage();
        assert!(storage.get_value("telescopeZoom").is_none());
    }

    #[test]
    fn test_save_and_load_value() {
        let (_dir, storage) = create_test_storage();

        let path = storage.set_value("telescopeZoom", "1.5").unwrap();
        assert!(path.exists());

        let loaded = storage
            .get_value("telescopeZoom")
            .expect("Value should exist")
            .expect("Value should load successfully");
        assert_eq!(loaded, "1.5");
    }

    #[test]
    fn test_overwrite_keeps_other_keys() {
        let (_dir, storage) = create_test_storage();

        storage.set_value("a", "1").unwrap();
        storage.set_value("b", "2").unwrap();
        storage.set_value("a", "3").unwrap();

        assert_eq!(storage.get_value("a").unwrap().unwrap(), "3");
        assert_eq!(storage.get_value("b").unwrap().unwrap(), "2");
    }

    #[test]
    fn test_corrupt_settings_file() {
        let (_dir, storage) = create_test_storage();

        std::fs::create_dir_all(storage.root_path()).unwrap();
        std::fs::write(storage.settings_path(), "not json").unwrap();

        let result = storage.get_value("telescopeZoom");
        assert!(matches!(result, Some(Err(_))));
    }
}
