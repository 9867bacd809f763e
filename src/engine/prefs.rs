// Flat key-value preference storage
//
// Mirrors an engine's player-prefs API: float and integer scalars under string
// keys, last write wins, explicit flush.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Preference storage errors
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed prefs file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A stored scalar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrefValue {
    Int(i64),
    Float(f32),
}

/// Key-value store the save system writes through
pub trait PrefsStore {
    fn set_float(&mut self, key: &str, value: f32);
    fn set_int(&mut self, key: &str, value: i64);
    fn get_float(&self, key: &str) -> Option<f32>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn has_key(&self, key: &str) -> bool;
    /// Persist pending writes
    fn flush(&mut self) -> Result<(), PrefsError>;
}

fn as_float(value: PrefValue) -> f32 {
    match value {
        PrefValue::Float(f) => f,
        PrefValue::Int(i) => i as f32,
    }
}

fn as_int(value: PrefValue) -> i64 {
    match value {
        PrefValue::Int(i) => i,
        PrefValue::Float(f) => f as i64,
    }
}

/// In-memory store; flushing is a no-op
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    values: HashMap<String, PrefValue>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PrefsStore for MemoryPrefs {
    fn set_float(&mut self, key: &str, value: f32) {
        self.values.insert(key.to_string(), PrefValue::Float(value));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), PrefValue::Int(value));
    }

    fn get_float(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied().map(as_float)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied().map(as_int)
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        Ok(())
    }
}

/// JSON file backed store. Reads once on open, rewrites the file on flush.
#[derive(Debug)]
pub struct JsonFilePrefs {
    path: PathBuf,
    memory: MemoryPrefs,
}

impl JsonFilePrefs {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str::<HashMap<String, PrefValue>>(&text)?
        } else {
            log::info!("No prefs file at {}, starting empty", path.display());
            HashMap::new()
        };

        Ok(Self {
            path,
            memory: MemoryPrefs { values },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrefsStore for JsonFilePrefs {
    fn set_float(&mut self, key: &str, value: f32) {
        self.memory.set_float(key, value);
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.memory.set_int(key, value);
    }

    fn get_float(&self, key: &str) -> Option<f32> {
        self.memory.get_float(key)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.memory.get_int(key)
    }

    fn has_key(&self, key: &str) -> bool {
        self.memory.has_key(key)
    }

    fn flush(&mut self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(&self.memory.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
