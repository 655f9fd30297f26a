use std::path::PathBuf;

/// Key the saved-stay collection lives under.
pub const DEFAULT_STORAGE_KEY: &str = "savedStays";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Read `STAYBOOK_DATA_DIR` and `STAYBOOK_STORAGE_KEY`, falling back to
    /// defaults for anything unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup("STAYBOOK_DATA_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_key = lookup("STAYBOOK_STORAGE_KEY")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.storage_key);
        Self {
            data_dir,
            storage_key,
        }
    }
}
