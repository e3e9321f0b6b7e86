//! AdminGate: double-checks the admin flag against the document store.
//!
//! The cached role alone is not trusted for admin pages. The gate starts in
//! `Checking` and settles once `resolve` has consulted `adminUsers/{uid}`.

use serde_json::Value;

use ratrack_core::constants::ADMIN_FLAG_FIELD;
use ratrack_core::models::SessionUser;
use ratrack_core::traits::DocumentStore;

use crate::guard::GuardOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatus {
    Checking,
    Granted,
    Denied,
}

/// One admin check for one user.
#[derive(Debug, Clone)]
pub struct AdminGate {
    uid: Option<String>,
    status: AdminStatus,
}

impl AdminGate {
    pub fn new(user: Option<&SessionUser>) -> Self {
        Self {
            uid: user.and_then(|u| u.uid()).map(str::to_string),
            status: AdminStatus::Checking,
        }
    }

    pub fn status(&self) -> AdminStatus {
        self.status
    }

    /// Look up the admin document and settle the gate. Idempotent once settled.
    pub fn resolve(&mut self, store: &dyn DocumentStore, admin_collection: &str) -> AdminStatus {
        if self.status != AdminStatus::Checking {
            return self.status;
        }
        self.status = match self.uid.as_deref() {
            None => {
                tracing::debug!("admin gate: no uid");
                AdminStatus::Denied
            }
            Some(uid) => match store.get(admin_collection, uid) {
                Ok(Some(doc)) if doc.field(ADMIN_FLAG_FIELD) == Some(&Value::Bool(true)) => {
                    AdminStatus::Granted
                }
                Ok(Some(_)) => {
                    tracing::debug!(uid, "admin gate: flag not set");
                    AdminStatus::Denied
                }
                Ok(None) => {
                    tracing::debug!(uid, "admin gate: no admin document");
                    AdminStatus::Denied
                }
                Err(e) => {
                    tracing::warn!(uid, error = %e, "admin gate: lookup failed");
                    AdminStatus::Denied
                }
            },
        };
        self.status
    }

    /// `None` while still checking.
    pub fn outcome(&self) -> Option<GuardOutcome> {
        match self.status {
            AdminStatus::Checking => None,
            AdminStatus::Granted => Some(GuardOutcome::Allow),
            AdminStatus::Denied => Some(GuardOutcome::to_login()),
        }
    }
}
