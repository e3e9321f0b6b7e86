//! SessionCache: the signed-in user, read from session scope then persistent scope.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use ratrack_core::config::SessionConfig;
use ratrack_core::errors::{RatrackResult, SessionError};
use ratrack_core::models::SessionUser;
use ratrack_core::traits::KeyValueStore;

/// Which storage layer a cached user came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Session,
    Persistent,
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageScope::Session => f.write_str("session"),
            StorageScope::Persistent => f.write_str("persistent"),
        }
    }
}

/// Two-layer cache of the signed-in user record.
pub struct SessionCache {
    session: Arc<dyn KeyValueStore>,
    persistent: Arc<dyn KeyValueStore>,
    user_key: String,
}

impl SessionCache {
    pub fn new(
        session: Arc<dyn KeyValueStore>,
        persistent: Arc<dyn KeyValueStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            session,
            persistent,
            user_key: config.user_key.clone(),
        }
    }

    /// The cached user, if any.
    ///
    /// Session scope is consulted first. A scope whose value is missing,
    /// unreadable, or not a JSON object is skipped, so a corrupt session
    /// entry falls through to the persistent one.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.read_scope(StorageScope::Session)
            .or_else(|| self.read_scope(StorageScope::Persistent))
    }

    /// Like [`current_user`](Self::current_user), also reporting the scope it came from.
    pub fn current_user_with_scope(&self) -> Option<(SessionUser, StorageScope)> {
        [StorageScope::Session, StorageScope::Persistent]
            .into_iter()
            .find_map(|scope| self.read_scope(scope).map(|user| (user, scope)))
    }

    /// Cache a user. `remember` also writes the persistent scope.
    pub fn sign_in(&self, user: &SessionUser, remember: bool) -> RatrackResult<()> {
        let raw = serde_json::to_string(user)?;
        self.session.set_item(&self.user_key, &raw)?;
        if remember {
            self.persistent.set_item(&self.user_key, &raw)?;
        }
        tracing::info!(uid = ?user.uid(), remember, "session: signed in");
        Ok(())
    }

    /// Forget the user in both scopes.
    pub fn sign_out(&self) -> RatrackResult<()> {
        self.session.remove_item(&self.user_key)?;
        self.persistent.remove_item(&self.user_key)?;
        tracing::info!("session: signed out");
        Ok(())
    }

    fn store(&self, scope: StorageScope) -> &dyn KeyValueStore {
        match scope {
            StorageScope::Session => self.session.as_ref(),
            StorageScope::Persistent => self.persistent.as_ref(),
        }
    }

    fn read_scope(&self, scope: StorageScope) -> Option<SessionUser> {
        let raw = match self.store(scope).get_item(&self.user_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(%scope, error = %e, "session: storage read failed");
                return None;
            }
        };

        match parse_cached_user(scope, &raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "session: skipping cached user");
                None
            }
        }
    }
}

/// Decode a cached user record. Anything but a JSON object of the expected
/// shape is [`SessionError::MalformedUser`].
fn parse_cached_user(scope: StorageScope, raw: &str) -> Result<SessionUser, SessionError> {
    let malformed = |reason: String| SessionError::MalformedUser {
        scope: scope.to_string(),
        reason,
    };
    match serde_json::from_str::<Value>(raw).map_err(|e| malformed(e.to_string()))? {
        value @ Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
        }
        _ => Err(malformed("not a JSON object".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryKeyValueStore;
    use ratrack_core::models::Role;

    fn cache() -> (SessionCache, Arc<MemoryKeyValueStore>, Arc<MemoryKeyValueStore>) {
        let session = Arc::new(MemoryKeyValueStore::new());
        let persistent = Arc::new(MemoryKeyValueStore::new());
        let cache = SessionCache::new(
            session.clone(),
            persistent.clone(),
            &SessionConfig::default(),
        );
        (cache, session, persistent)
    }

    #[test]
    fn session_scope_wins() {
        let (cache, session, persistent) = cache();
        session
            .set_item("currentUser", r#"{"uid":"s","role":"patient"}"#)
            .unwrap();
        persistent
            .set_item("currentUser", r#"{"uid":"p","role":"admin"}"#)
            .unwrap();
        let (user, scope) = cache.current_user_with_scope().unwrap();
        assert_eq!(user.uid(), Some("s"));
        assert_eq!(scope, StorageScope::Session);
    }

    #[test]
    fn corrupt_session_entry_falls_through() {
        let (cache, session, persistent) = cache();
        session.set_item("currentUser", "{not json").unwrap();
        persistent
            .set_item("currentUser", r#"{"uid":"p","role":"admin"}"#)
            .unwrap();
        let user = cache.current_user().unwrap();
        assert_eq!(user.role, Some(Role::Admin));
    }

    #[test]
    fn non_object_values_are_ignored() {
        let (cache, session, persistent) = cache();
        session.set_item("currentUser", "null").unwrap();
        persistent.set_item("currentUser", "\"u1\"").unwrap();
        assert!(cache.current_user().is_none());
    }

    #[test]
    fn malformed_entries_report_scope_and_reason() {
        let err = parse_cached_user(StorageScope::Persistent, "[1]").unwrap_err();
        assert!(matches!(
            &err,
            SessionError::MalformedUser { scope, reason }
                if scope == "persistent" && reason == "not a JSON object"
        ));

        let err = parse_cached_user(StorageScope::Session, "{oops").unwrap_err();
        assert!(err.to_string().starts_with("cached user in session storage is malformed"));

        let user = parse_cached_user(StorageScope::Session, r#"{"uid":"u1"}"#).unwrap();
        assert_eq!(user.uid(), Some("u1"));
    }

    #[test]
    fn sign_in_without_remember_stays_in_session_scope() {
        let (cache, session, persistent) = cache();
        cache
            .sign_in(&SessionUser::new("u1", Role::Patient), false)
            .unwrap();
        assert!(session.get_item("currentUser").unwrap().is_some());
        assert!(persistent.get_item("currentUser").unwrap().is_none());

        cache.sign_out().unwrap();
        assert!(cache.current_user().is_none());
    }
}
