use crate::errors::RatrackResult;

/// String key/value storage with browser-storage semantics.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> RatrackResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> RatrackResult<()>;
    fn remove_item(&self, key: &str) -> RatrackResult<()>;
}
