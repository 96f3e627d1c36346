//! Backend confirmation that a stored token is still accepted.
//!
//! ERROR HANDLING
//! ==============
//! Transport errors, rejections, and undecodable tokens all collapse into
//! `None`: the client cannot act differently on any of them, so each one
//! reads as "not logged in".

#[cfg(test)]
#[path = "verify_test.rs"]
mod verify_test;

use async_trait::async_trait;

use super::api::{ApiClient, ApiError};
use crate::state::session::Session;
use crate::util::token;

/// Asks the backend whether `token` is still valid.
#[async_trait(?Send)]
pub trait SessionVerifier {
    /// One round trip. `Some` only when the backend accepts the token and it
    /// decodes into a session.
    async fn verify(&self, token: &str) -> Option<Session>;
}

/// Verifier calling `POST token/verify`.
#[derive(Clone, Debug, Default)]
pub struct HttpVerifier {
    api: ApiClient,
}

impl HttpVerifier {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait(?Send)]
impl SessionVerifier for HttpVerifier {
    async fn verify(&self, token: &str) -> Option<Session> {
        session_from_verification(self.api.verify_token(token).await, token)
    }
}

/// Session for `token` once the backend has answered `result`.
pub(crate) fn session_from_verification(result: Result<(), ApiError>, token: &str) -> Option<Session> {
    if let Err(e) = result {
        log::warn!("stored session rejected: {e}");
        return None;
    }
    match token::decode(token) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("verified token could not be decoded: {e}");
            None
        }
    }
}
