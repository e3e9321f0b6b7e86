use serde::{Deserialize, Serialize};

use crate::constants::{ADMIN_COLLECTION, CURRENT_USER_KEY};

/// Session cache and admin lookup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage key of the cached user record.
    pub user_key: String,
    /// Collection consulted by the admin gate.
    pub admin_collection: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_key: CURRENT_USER_KEY.to_string(),
            admin_collection: ADMIN_COLLECTION.to_string(),
        }
    }
}
