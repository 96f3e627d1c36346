//! Session identity and the three-state authentication model.
//!
//! DESIGN
//! ======
//! `Initializing` is a distinct state rather than a loading flag next to an
//! optional user, so no consumer can read a stored-but-unverified token as
//! an authenticated session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Errors raised while establishing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The token could not be parsed into `{ id, name, rol }` claims.
    #[error("malformed token: {0}")]
    MalformedToken(String),
}

/// Decoded identity of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Backend user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    roles: Vec<String>,
}

impl Session {
    /// Build a session, rejecting an empty role list.
    pub fn new(id: i64, name: impl Into<String>, roles: Vec<String>) -> Option<Self> {
        if roles.is_empty() {
            return None;
        }
        Some(Self { id, name: name.into(), roles })
    }

    /// Role names in token order.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// The first listed role. Authorization decisions only look at this one.
    pub fn primary_role(&self) -> &str {
        self.roles.first().map_or("", String::as_str)
    }

    /// Whether the primary role is `role`.
    pub fn is_primary(&self, role: &str) -> bool {
        self.primary_role() == role
    }
}

/// Current authentication state of this client instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Boot-time restore has not finished; nothing may be authorized yet.
    #[default]
    Initializing,
    /// A decoded, accepted session.
    Authenticated(Session),
    /// No session: never logged in, logged out, or verification failed.
    Unauthenticated,
}

impl SessionState {
    pub fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
