//! User preferences that outlive a single run.
//!
//! The store is passed to whoever needs it; nothing reads settings through
//! process-wide state.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const HIDE_INTRO: &str = "hide_intro";

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Settings kept only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Settings persisted as a flat JSON object, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileSettings {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, String> = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                Error::Settings(format!("{} is not a settings file: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::io(&path, e)),
        };
        Ok(Self { path, values })
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, text).map_err(|e| Error::io(&self.path, e))
    }
}

pub fn intro_hidden(store: &dyn SettingsStore) -> bool {
    store.get(HIDE_INTRO).as_deref() == Some("1")
}

pub fn hide_intro(store: &mut dyn SettingsStore) -> Result<()> {
    store.set(HIDE_INTRO, "1")
}
