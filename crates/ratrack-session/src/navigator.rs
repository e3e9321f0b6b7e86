//! Navigator: resolves a path, applies its guard, and yields what to show.

use std::fmt;
use std::sync::Arc;

use ratrack_core::config::SessionConfig;
use ratrack_core::constants::HOME_PATH;
use ratrack_core::guard_span;
use ratrack_core::models::SessionUser;
use ratrack_core::traits::DocumentStore;

use crate::admin_gate::AdminGate;
use crate::cache::SessionCache;
use crate::guard::{require_auth, GuardOutcome};
use crate::router::{Page, RouteGuard, Router};

/// Result of a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Page),
    Redirect { to: String, replace: bool },
    /// An admin check has not settled yet.
    Pending,
}

impl Navigation {
    fn from_outcome(outcome: GuardOutcome, page: Page) -> Self {
        match outcome {
            GuardOutcome::Allow => Navigation::Render(page),
            GuardOutcome::Redirect { to, replace } => Navigation::Redirect { to, replace },
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Render(page) => write!(f, "render {page}"),
            Navigation::Redirect { to, replace } => {
                write!(f, "redirect {to}")?;
                if *replace {
                    f.write_str(" (replace)")?;
                }
                Ok(())
            }
            Navigation::Pending => f.write_str("pending"),
        }
    }
}

#[derive(Debug, Clone)]
enum AttemptState {
    Decided(Navigation),
    AwaitingAdmin { page: Page, gate: AdminGate },
}

/// A navigation in flight. Admin routes stay `Pending` until [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct NavigationAttempt {
    path: String,
    state: AttemptState,
}

impl NavigationAttempt {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn decision(&self) -> Navigation {
        match &self.state {
            AttemptState::Decided(nav) => nav.clone(),
            AttemptState::AwaitingAdmin { .. } => Navigation::Pending,
        }
    }

    /// Settle a pending admin check. Already-decided attempts are unchanged.
    pub fn resolve(&mut self, store: &dyn DocumentStore, admin_collection: &str) -> Navigation {
        if let AttemptState::AwaitingAdmin { page, gate } = &mut self.state {
            gate.resolve(store, admin_collection);
            let settled = gate
                .outcome()
                .map(|outcome| Navigation::from_outcome(outcome, *page));
            if let Some(nav) = settled {
                self.state = AttemptState::Decided(nav);
            }
        }
        self.decision()
    }
}

pub struct Navigator {
    cache: SessionCache,
    router: Router,
    store: Arc<dyn DocumentStore>,
    admin_collection: String,
}

impl Navigator {
    pub fn new(
        cache: SessionCache,
        router: Router,
        store: Arc<dyn DocumentStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            cache,
            router,
            store,
            admin_collection: config.admin_collection.clone(),
        }
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.cache.current_user()
    }

    /// Begin a navigation without touching the document store.
    pub fn start(&self, path: &str) -> NavigationAttempt {
        let _span = guard_span!(path).entered();
        let Some(route) = self.router.resolve(path) else {
            tracing::debug!("guard: unknown route, falling back to home");
            return NavigationAttempt {
                path: path.to_string(),
                state: AttemptState::Decided(Navigation::Redirect {
                    to: HOME_PATH.to_string(),
                    replace: true,
                }),
            };
        };

        let state = match &route.guard {
            RouteGuard::Public => AttemptState::Decided(Navigation::Render(route.page)),
            RouteGuard::Role(role) => {
                let user = self.cache.current_user();
                let outcome = require_auth(user.as_ref(), Some(role));
                AttemptState::Decided(Navigation::from_outcome(outcome, route.page))
            }
            RouteGuard::Admin => AttemptState::AwaitingAdmin {
                page: route.page,
                gate: AdminGate::new(self.cache.current_user().as_ref()),
            },
        };
        NavigationAttempt {
            path: path.to_string(),
            state,
        }
    }

    /// Navigate and settle any admin check against the configured store.
    pub fn navigate(&self, path: &str) -> Navigation {
        let mut attempt = self.start(path);
        let decision = attempt.resolve(self.store.as_ref(), &self.admin_collection);
        tracing::info!(path, decision = %decision, "guard: navigation decided");
        decision
    }
}
