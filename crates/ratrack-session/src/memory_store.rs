//! MemoryKeyValueStore: process-lifetime storage via DashMap.

use dashmap::DashMap;

use ratrack_core::errors::RatrackResult;
use ratrack_core::traits::KeyValueStore;

/// Thread-safe in-memory key/value store. Plays the role of browser
/// session storage: it lives exactly as long as the process.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    items: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> RatrackResult<Option<String>> {
        Ok(self.items.get(key).map(|v| v.clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> RatrackResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> RatrackResult<()> {
        self.items.remove(key);
        Ok(())
    }
}
