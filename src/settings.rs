use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Rows per page for the two paginated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSizes {
    pub games: usize,
    pub thoughts: usize,
}

impl PageSizes {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 || self.thoughts == 0 {
            bail!(
                "page sizes must be positive (games: {}, thoughts: {})",
                self.games,
                self.thoughts
            );
        }
        Ok(())
    }
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            games: 10,
            thoughts: 10,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSettings {
    #[serde(default)]
    page_sizes: PageSizes,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let parsed: UserSettings = serde_json::from_str(&contents).unwrap_or_default();
            if parsed.page_sizes.validate().is_ok() {
                parsed
            } else {
                UserSettings::default()
            }
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn page_sizes(&self) -> PageSizes {
        self.read().page_sizes
    }

    pub fn update_page_sizes(&self, sizes: PageSizes) -> Result<()> {
        sizes.validate()?;
        let mut guard = self.write();
        guard.page_sizes = sizes;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path().join("settings.json")).expect("store");
        assert_eq!(store.page_sizes(), PageSizes::default());
    }

    #[test]
    fn updates_persist_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).expect("store");
        let sizes = PageSizes { games: 25, thoughts: 5 };
        store.update_page_sizes(sizes).expect("update");

        let reopened = SettingsStore::new(path).expect("reopen");
        assert_eq!(reopened.page_sizes(), sizes);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SettingsStore::new(dir.path().join("settings.json")).expect("store");

        let err = store
            .update_page_sizes(PageSizes { games: 0, thoughts: 10 })
            .unwrap_err();
        assert!(err.to_string().contains("positive"));
        assert_eq!(store.page_sizes(), PageSizes::default());
    }

    #[test]
    fn unreadable_or_invalid_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{ not json").expect("write");
        let store = SettingsStore::new(garbage).expect("store");
        assert_eq!(store.page_sizes(), PageSizes::default());

        let zeroes = dir.path().join("zeroes.json");
        fs::write(&zeroes, r#"{"pageSizes":{"games":0,"thoughts":0}}"#).expect("write");
        let store = SettingsStore::new(zeroes).expect("store");
        assert_eq!(store.page_sizes(), PageSizes::default());
    }
}
