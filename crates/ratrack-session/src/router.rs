//! Route table: path patterns mapped to pages and the guard each one needs.

use std::fmt;

use ratrack_core::models::Role;

/// A page the application can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    Register,
    PatientDashboard,
    PatientPage,
    AdminPage,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Home => "home",
            Page::Login => "login",
            Page::Register => "register",
            Page::PatientDashboard => "patient-dashboard",
            Page::PatientPage => "patient-page",
            Page::AdminPage => "admin-page",
        };
        f.write_str(name)
    }
}

/// Access rule attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteGuard {
    Public,
    /// Signed in with exactly this cached role.
    Role(Role),
    /// Admin flag confirmed against the document store.
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Either an exact path (`/login`) or a splat (`/patient/*`).
    pub pattern: String,
    pub page: Page,
    pub guard: RouteGuard,
}

impl Route {
    pub fn new(pattern: impl Into<String>, page: Page, guard: RouteGuard) -> Self {
        Self {
            pattern: pattern.into(),
            page,
            guard,
        }
    }

    fn splat_prefix(&self) -> Option<&str> {
        self.pattern.strip_suffix("/*")
    }

    /// Exact routes match one path. A splat `/x/*` matches `/x` and anything below it.
    pub fn matches(&self, path: &str) -> bool {
        match self.splat_prefix() {
            Some(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            None => path == self.pattern,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(vec![
            Route::new("/", Page::Home, RouteGuard::Public),
            Route::new("/login", Page::Login, RouteGuard::Public),
            Route::new("/register", Page::Register, RouteGuard::Public),
            Route::new(
                "/patient/dashboard",
                Page::PatientDashboard,
                RouteGuard::Role(Role::Patient),
            ),
            Route::new("/patient/*", Page::PatientPage, RouteGuard::Role(Role::Patient)),
            Route::new("/admin/*", Page::AdminPage, RouteGuard::Admin),
        ])
    }
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Best route for `path`, or `None` when only the fallback applies.
    ///
    /// An exact route always outranks a splat; among splats the longest
    /// prefix wins. Query strings, fragments and trailing slashes are ignored.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        if let Some(exact) = self
            .routes
            .iter()
            .find(|r| r.splat_prefix().is_none() && r.matches(&path))
        {
            return Some(exact);
        }
        self.routes
            .iter()
            .filter(|r| r.splat_prefix().is_some() && r.matches(&path))
            .max_by_key(|r| r.pattern.len())
    }
}

fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
