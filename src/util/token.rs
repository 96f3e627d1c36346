//! Bearer token decoding.
//!
//! The backend issues JWTs whose payload carries `id`, `name`, and `rol`.
//! Only the payload segment is read; signature checks belong to the backend
//! and happen through `token/verify`.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::net::types::deserialize_i64_lenient;
use crate::state::session::{Session, SessionError};

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(deserialize_with = "deserialize_i64_lenient")]
    id: i64,
    name: String,
    rol: RoleClaim,
}

/// Identity providers emit a bare string when the user holds a single role.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleClaim {
    One(String),
    Many(Vec<String>),
}

impl RoleClaim {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(role) => vec![role],
            Self::Many(roles) => roles,
        }
    }
}

/// Decode a raw token into a [`Session`].
///
/// # Errors
///
/// Returns [`SessionError::MalformedToken`] when the token is empty, has no
/// payload segment, the payload is not base64url JSON, the claims are
/// missing, or the role list is empty.
pub fn decode(token: &str) -> Result<Session, SessionError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(malformed("token is missing or empty"));
    }
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| malformed("missing payload segment"))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| malformed(&format!("payload is not base64url: {e}")))?;
    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|e| malformed(&format!("unexpected claim shape: {e}")))?;

    let roles = claims.rol.into_vec();
    Session::new(claims.id, claims.name, roles).ok_or_else(|| malformed("role claim is empty"))
}

fn malformed(reason: &str) -> SessionError {
    SessionError::MalformedToken(reason.to_owned())
}

// =============================================================================
// TEST HELPERS
// =============================================================================
