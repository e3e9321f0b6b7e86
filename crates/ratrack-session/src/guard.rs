//! Role guard over the cached user.

use ratrack_core::constants::LOGIN_PATH;
use ratrack_core::models::{Role, SessionUser};

/// What a guard decided for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect { to: String, replace: bool },
}

impl GuardOutcome {
    pub(crate) fn to_login() -> Self {
        GuardOutcome::Redirect {
            to: LOGIN_PATH.to_string(),
            replace: true,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allow)
    }
}

/// Allow when a user is signed in and, if `required` is given, holds exactly that role.
pub fn require_auth(user: Option<&SessionUser>, required: Option<&Role>) -> GuardOutcome {
    let Some(user) = user else {
        tracing::debug!("guard: no cached user");
        return GuardOutcome::to_login();
    };
    match required {
        Some(role) if !user.has_role(role) => {
            tracing::debug!(required = %role, actual = ?user.role, "guard: role mismatch");
            GuardOutcome::to_login()
        }
        _ => GuardOutcome::Allow,
    }
}
