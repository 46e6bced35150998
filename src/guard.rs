// ABOUTME: Navigation guard deciding allow, pending or redirect for a session and path
// ABOUTME: Pure state machine over session state and public, user and admin route classes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Navigation Guard
//!
//! Admin access is decided by URL prefix alone. Any authenticated account
//! reaching `/admin/*` is let through; there is no role check.

use serde::Serialize;

use crate::session::{SessionContext, SessionState};

/// Login page for the user area
pub const LOGIN_PATH: &str = "/login";
/// Landing page after sign-in
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Login page for the admin area
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
/// Landing page after admin sign-in
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";
/// Prefix of the admin area
pub const ADMIN_PREFIX: &str = "/admin";

/// Routes reachable without signing in
pub const PUBLIC_ROUTES: [&str; 4] = ["/", LOGIN_PATH, "/signup", ADMIN_LOGIN_PATH];

/// Kind of route being requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    /// Reachable without signing in
    Public,
    /// User area
    User,
    /// Admin area
    Admin,
}

/// What the shell should do with a navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Render the requested route
    Allow,
    /// Render a placeholder until the session resolves
    Pending,
    /// Navigate to another route instead
    Redirect(String),
}

impl GuardDecision {
    fn redirect(target: &str) -> Self {
        Self::Redirect(target.to_owned())
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Route guard
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationGuard;

impl NavigationGuard {
    /// Classify a path; `/admin/login` counts as both public and admin, and
    /// is reported as admin
    #[must_use]
    pub fn classify(path: &str) -> RouteClass {
        let path = normalize(path);
        if is_admin_path(path) {
            RouteClass::Admin
        } else if PUBLIC_ROUTES.contains(&path) {
            RouteClass::Public
        } else {
            RouteClass::User
        }
    }

    /// Decide what to do when `session` navigates to `path`
    #[must_use]
    pub fn decide(session: &SessionContext, path: &str) -> GuardDecision {
        let path = normalize(path);
        let class = Self::classify(path);
        let public = PUBLIC_ROUTES.contains(&path);

        match (&session.state, class) {
            (SessionState::Loading, RouteClass::Public) => GuardDecision::Allow,
            (SessionState::Loading, RouteClass::User | RouteClass::Admin) => {
                GuardDecision::Pending
            }
            (SessionState::Authenticated(_), RouteClass::Public) => {
                GuardDecision::redirect(DASHBOARD_PATH)
            }
            (SessionState::Authenticated(_), RouteClass::Admin) if path == ADMIN_LOGIN_PATH => {
                GuardDecision::redirect(ADMIN_DASHBOARD_PATH)
            }
            (SessionState::Anonymous, RouteClass::User) => GuardDecision::redirect(LOGIN_PATH),
            (SessionState::Anonymous, RouteClass::Admin) if !public => {
                GuardDecision::redirect(ADMIN_LOGIN_PATH)
            }
            _ => GuardDecision::Allow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionContext {
        SessionContext::authenticated("u-1", None)
    }

    #[test]
    fn test_anonymous_redirects() {
        let anon = SessionContext::anonymous();
        assert_eq!(
            NavigationGuard::decide(&anon, "/dashboard"),
            GuardDecision::Redirect("/login".to_owned())
        );
        assert_eq!(
            NavigationGuard::decide(&anon, "/admin/dashboard"),
            GuardDecision::Redirect("/admin/login".to_owned())
        );
        assert_eq!(NavigationGuard::decide(&anon, "/admin/login"), GuardDecision::Allow);
        assert_eq!(NavigationGuard::decide(&anon, "/signup"), GuardDecision::Allow);
        assert_eq!(NavigationGuard::decide(&anon, "/"), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated_redirects() {
        assert_eq!(
            NavigationGuard::decide(&user(), "/admin/login"),
            GuardDecision::Redirect("/admin/dashboard".to_owned())
        );
        assert_eq!(
            NavigationGuard::decide(&user(), "/login"),
            GuardDecision::Redirect("/dashboard".to_owned())
        );
        assert_eq!(NavigationGuard::decide(&user(), "/diet-plan"), GuardDecision::Allow);
    }

    #[test]
    fn test_any_authenticated_account_reaches_admin_area() {
        assert_eq!(
            NavigationGuard::decide(&user(), "/admin/analytics"),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_loading_never_redirects() {
        let loading = SessionContext::loading();
        assert_eq!(NavigationGuard::decide(&loading, "/dashboard"), GuardDecision::Pending);
        assert_eq!(NavigationGuard::decide(&loading, "/admin/users"), GuardDecision::Pending);
        assert_eq!(NavigationGuard::decide(&loading, "/login"), GuardDecision::Allow);
    }

    #[test]
    fn test_paths_are_normalized() {
        assert_eq!(NavigationGuard::classify("/dashboard/"), RouteClass::User);
        assert_eq!(NavigationGuard::classify("/login?next=/x"), RouteClass::Public);
        assert_eq!(NavigationGuard::classify("/administrator"), RouteClass::User);
        assert_eq!(NavigationGuard::classify("/admin"), RouteClass::Admin);
    }
}
