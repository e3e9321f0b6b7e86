use serde::{Deserialize, Serialize};

use crate::constants::{LAB_COLLECTIONS, LAB_CREATED_AT_FIELD, LAB_USER_FIELD};

/// Lab record lookup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabsConfig {
    /// Collections probed in order; the first with a dated matching document wins.
    pub collections: Vec<String>,
    /// Field holding the owning user's uid.
    pub user_field: String,
    /// Field holding the entry timestamp.
    pub created_at_field: String,
}

impl Default for LabsConfig {
    fn default() -> Self {
        Self {
            collections: LAB_COLLECTIONS.iter().map(|c| c.to_string()).collect(),
            user_field: LAB_USER_FIELD.to_string(),
            created_at_field: LAB_CREATED_AT_FIELD.to_string(),
        }
    }
}
