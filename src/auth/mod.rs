//! Session-based auth gate
//!
//! Users live in a file-backed store with salted credential digests; logins
//! issue opaque bearer tokens that are held in memory for the lifetime of
//! the server process. Write operations check the session's role.

pub mod users;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// What a user account is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May create spots and toggle register mode
    Editor,
    /// Read-only browsing
    Viewer,
}

impl Role {
    /// Whether this role carries write capability
    pub fn can_write(&self) -> bool {
        matches!(self, Self::Editor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Editor => write!(f, "editor"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

/// Public view of a user account, safe to serialize to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
}

impl User {
    /// Whether the user may create spots
    pub fn can_write(&self) -> bool {
        self.role.can_write()
    }
}

/// In-memory session table mapping bearer tokens to users
#[derive(Debug, Default)]
pub struct Sessions {
    tokens: HashMap<String, User>,
}

impl Sessions {
    /// Create an empty session table
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for a verified user, returning the bearer token
    pub fn open(&mut self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user);
        token
    }

    /// Look up the user behind a token
    pub fn current_user(&self, token: &str) -> Option<&User> {
        self.tokens.get(token)
    }

    /// End a session; returns false if the token was unknown
    pub fn revoke(&mut self, token: &str) -> bool {
        self.tokens.remove(token).is_some()
    }

    /// Number of active sessions
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if no sessions are active
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            email: "a@a.com".to_string(),
            name: Some("admin".to_string()),
            role,
        }
    }

    #[test]
    fn test_roles() {
        assert!(Role::Editor.can_write());
        assert!(!Role::Viewer.can_write());
    }

    #[test]
    fn test_session_lifecycle() {
        let mut sessions = Sessions::new();
        assert!(sessions.is_empty());

        let token = sessions.open(test_user(Role::Editor));
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions.current_user(&token).unwrap().email, "a@a.com");

        assert!(sessions.revoke(&token));
        assert!(sessions.current_user(&token).is_none());
        assert!(!sessions.revoke(&token));
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut sessions = Sessions::new();
        let a = sessions.open(test_user(Role::Editor));
        let b = sessions.open(test_user(Role::Viewer));
        assert_ne!(a, b);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token(""), None);
    }
}
