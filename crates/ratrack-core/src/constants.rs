/// RA Track version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key under which the signed-in user is cached in both storage scopes.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Collection holding one document per admin, keyed by uid.
pub const ADMIN_COLLECTION: &str = "adminUsers";

/// Field on an admin document that must be exactly `true`.
pub const ADMIN_FLAG_FIELD: &str = "isAdmin";

/// Collections probed for lab entries, in priority order.
pub const LAB_COLLECTIONS: [&str; 4] = ["LabInformation", "labInformation", "userLabs", "labResults"];

/// Field linking a lab document to its owner.
pub const LAB_USER_FIELD: &str = "userId";

/// Field used to order lab documents (newest first).
pub const LAB_CREATED_AT_FIELD: &str = "createdAt";

/// Path of the remote comparison endpoint, relative to the backend URL.
pub const COMPARE_RISK_PATH: &str = "/api/compare-ra-risk";

/// Redirect target for unauthenticated or unauthorized navigation.
pub const LOGIN_PATH: &str = "/login";

/// Redirect target for unknown routes.
pub const HOME_PATH: &str = "/";
