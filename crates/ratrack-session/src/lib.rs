//! # ratrack-session
//!
//! Reads the cached user, gates routes by role, and double-checks admin
//! access against the document store.

pub mod admin_gate;
pub mod cache;
pub mod guard;
pub mod memory_store;
pub mod navigator;
pub mod router;

pub use admin_gate::{AdminGate, AdminStatus};
pub use cache::{SessionCache, StorageScope};
pub use guard::{require_auth, GuardOutcome};
pub use memory_store::MemoryKeyValueStore;
pub use navigator::{Navigation, NavigationAttempt, Navigator};
pub use router::{Page, Route, RouteGuard, Router};
