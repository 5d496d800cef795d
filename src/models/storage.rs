use crate::error::StorageError;
use crate::models::SnippetSet;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key holding the whole snippet set
pub const SNIPPETS_KEY: &str = "snippets";

/// Total quota of a synchronized storage area, in bytes.
pub const DEFAULT_QUOTA_BYTES: usize = 102_400;

/// A key-value storage area holding JSON values.
pub trait KeyValueStore: std::fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Measures an item the way synchronized storage does: key plus serialized value.
fn item_size(key: &str, value: &Value) -> Result<usize, StorageError> {
    Ok(key.len() + serde_json::to_string(value)?.len())
}

fn check_quota(key: &str, value: &Value, quota: Option<usize>) -> Result<(), StorageError> {
    if let Some(quota) = quota {
        let bytes = item_size(key, value)?;
        if bytes > quota {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                bytes,
                quota,
            });
        }
    }
    Ok(())
}

/// File-backed storage area: one JSON object mapping keys to values.
///
/// Every `get` reads the file again, so a reload sees writes made by another
/// instance. Writes are not coordinated between instances; the last one wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>, quota_bytes: Option<usize>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { path, quota_bytes })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::Unavailable(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        check_quota(key, &value, self.quota_bytes)?;

        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);

        let content = serde_json::to_string_pretty(&Value::Object(all))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// In-process storage area. Contents last as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
    quota_bytes: Option<usize>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// A store whose writes all fail, as a disappeared storage context would.
    #[cfg(test)]
    pub fn read_only() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seeds a value without going through `set`, so it works on read-only stores.
    #[cfg(test)]
    pub fn preloaded(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(
                "storage context is gone".to_string(),
            ));
        }
        check_quota(key, &value, self.quota_bytes)?;

        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Reads and writes the snippet set under [`SNIPPETS_KEY`].
#[derive(Debug)]
pub struct SnippetRepository {
    store: Box<dyn KeyValueStore>,
}

impl SnippetRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads the whole set. An absent key is an empty set.
    pub fn load(&self) -> Result<SnippetSet, StorageError> {
        match self.store.get(SNIPPETS_KEY)? {
            Some(Value::Null) | None => Ok(SnippetSet::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Replaces the stored set with `snippets`.
    pub fn save(&mut self, snippets: &SnippetSet) -> Result<(), StorageError> {
        let value = serde_json::to_value(snippets)?;
        self.store.set(SNIPPETS_KEY, value)
    }
}
