// ABOUTME: Explicit per-request session context passed to actions and the navigation guard
// ABOUTME: Models loading, anonymous and authenticated states without global auth state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Account identified by the upstream auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Stable user id
    pub id: String,
    /// Email, when the provider shares it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Authentication state of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionState {
    /// The auth provider has not resolved the session yet
    Loading,
    /// No signed-in user
    Anonymous,
    /// Signed-in user
    Authenticated(SessionUser),
}

/// Session context handed explicitly to every handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Current state
    pub state: SessionState,
}

impl SessionContext {
    /// Session still being resolved
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            state: SessionState::Loading,
        }
    }

    /// Session with no user
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    /// Session for a signed-in user
    #[must_use]
    pub fn authenticated(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            state: SessionState::Authenticated(SessionUser {
                id: id.into(),
                email,
            }),
        }
    }

    /// Signed-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }

    /// User id for logs
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|user| user.id.as_str())
    }

    /// Whether a user is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accessors() {
        let session = SessionContext::authenticated("u-1", Some("a@example.com".to_owned()));
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some("u-1"));
        assert_eq!(SessionContext::loading().user_id(), None);
        assert!(!SessionContext::default().is_authenticated());
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let json = serde_json::to_value(SessionContext::anonymous()).unwrap();
        assert_eq!(json["state"]["status"], "anonymous");
    }
}
