//! REST resource clients for the book catalogue backend.
//!
//! Browser (`csr`): real HTTP calls via `gloo-net`, each carrying the stored
//! bearer token. Native builds: every call returns
//! [`ApiError::Unavailable`] so pure view logic stays testable off-browser.
//!
//! ERROR HANDLING
//! ==============
//! Each call states the status it expects. Anything else becomes
//! [`ApiError::Status`]; views turn errors into a transient notification and
//! leave local state untouched.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{Book, BookPayload, Category, Comment, LoginRequest, RegisterRequest, TokenResponse};
use crate::config::ClientConfig;
use crate::util::token_store::{LocalStorageTokenStore, TokenStore};

/// Failure of a single resource call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("not available outside the browser")]
    Unavailable,
}

impl ApiError {
    /// HTTP status when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-supplied message from a rejected request, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for the user-facing notification.
    ///
    /// A success code other than the expected one reads as "Server error";
    /// every other failure uses the action-specific `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self.status() {
            Some(status) if (200..300).contains(&status) => "Server error".to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Status a call must return to count as success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    AnySuccess,
    Exactly(u16),
}

#[cfg(any(test, feature = "csr"))]
fn check_status(status: u16, expect: Expect) -> bool {
    match expect {
        Expect::AnySuccess => (200..300).contains(&status),
        Expect::Exactly(code) => status == code,
    }
}

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: Option<&str>) -> Option<String> {
    token.map(|t| format!("Bearer {t}"))
}

fn comments_path(book_id: i64) -> String {
    format!("books/comments/{book_id}")
}

fn rate_path(book_id: i64, rating: Option<u8>) -> String {
    format!("books/rate/{book_id}?rating={}", rating.unwrap_or(0))
}

fn favorite_path(book_id: i64) -> String {
    format!("books/favorite/{book_id}")
}

fn edit_book_path(book_id: i64) -> String {
    format!("books/edit/{book_id}")
}

fn delete_book_path(book_id: i64) -> String {
    format!("books/delete/{book_id}")
}

fn edit_category_path(category_id: i64) -> String {
    format!("category/edit/{category_id}")
}

fn delete_category_path(category_id: i64) -> String {
    format!("category/delete/{category_id}")
}

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    comment: &'a str,
}

/// Stateless HTTP wrapper; cheap to clone into event handlers.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    tokens: Arc<dyn TokenStore + Send + Sync>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ApiClient {
    /// Client reading the bearer token from `localStorage`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_token_store(config, LocalStorageTokenStore)
    }

    /// Client reading the bearer token from `tokens` on every request.
    pub fn with_token_store<S>(config: ClientConfig, tokens: S) -> Self
    where
        S: TokenStore + Send + Sync + 'static,
    {
        Self { config, tokens: Arc::new(tokens) }
    }

    /// Token attached to the next authorized request.
    fn bearer_token(&self) -> Option<String> {
        self.tokens.read()
    }

    /// `POST auth/login`, returning the issued token.
    ///
    /// # Errors
    ///
    /// `Status { status: 400, .. }` for bad credentials; other variants on
    /// transport or body failures.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let body: TokenResponse = self
            .request_json(Verb::Post, "auth/login", Some(request), Expect::Exactly(200))
            .await?;
        Ok(body.token)
    }

    /// `POST auth/register`.
    ///
    /// # Errors
    ///
    /// A 400 carries the backend's rejection message in `Status::message`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.request_empty(Verb::Post, "auth/register", Some(request), Expect::AnySuccess)
            .await
    }

    /// `POST token/verify` with an explicit token rather than the stored one.
    ///
    /// # Errors
    ///
    /// Any status other than 200 or a transport failure.
    pub async fn verify_token(&self, token: &str) -> Result<(), ApiError> {
        self.send_raw(Verb::Post, "token/verify", Some(&serde_json::json!({})), Some(token), Expect::Exactly(200))
            .await
            .map(|_| ())
    }

    /// `GET books`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn books(&self) -> Result<Vec<Book>, ApiError> {
        self.request_json(Verb::Get, "books", None::<&()>, Expect::AnySuccess).await
    }

    /// `GET category`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.request_json(Verb::Get, "category", None::<&()>, Expect::AnySuccess)
            .await
    }

    /// `GET books/comments/{id}`.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn comments(&self, book_id: i64) -> Result<Vec<Comment>, ApiError> {
        self.request_json(Verb::Get, &comments_path(book_id), None::<&()>, Expect::AnySuccess)
            .await
    }

    /// `POST books/comments/{id}`; expects 201.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 201.
    pub async fn post_comment(&self, book_id: i64, comment: &str) -> Result<(), ApiError> {
        let body = CommentBody { comment };
        self.request_empty(Verb::Post, &comments_path(book_id), Some(&body), Expect::Exactly(201))
            .await
    }

    /// `POST books/rate/{id}?rating=n`; `None` clears the rating (sent as 0).
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn rate_book(&self, book_id: i64, rating: Option<u8>) -> Result<(), ApiError> {
        let empty = serde_json::json!({});
        self.request_empty(Verb::Post, &rate_path(book_id, rating), Some(&empty), Expect::Exactly(200))
            .await
    }

    /// `POST books/favorite/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn add_favorite(&self, book_id: i64) -> Result<(), ApiError> {
        let empty = serde_json::json!({});
        self.request_empty(Verb::Post, &favorite_path(book_id), Some(&empty), Expect::Exactly(200))
            .await
    }

    /// `DELETE books/favorite/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn remove_favorite(&self, book_id: i64) -> Result<(), ApiError> {
        self.request_empty(Verb::Delete, &favorite_path(book_id), None::<&()>, Expect::Exactly(200))
            .await
    }

    /// `POST books/add`; expects 201 with the created book.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn add_book(&self, payload: &BookPayload) -> Result<Book, ApiError> {
        self.request_json(Verb::Post, "books/add", Some(payload), Expect::Exactly(201))
            .await
    }

    /// `POST books/edit/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn edit_book(&self, book_id: i64, payload: &BookPayload) -> Result<(), ApiError> {
        self.request_empty(Verb::Post, &edit_book_path(book_id), Some(payload), Expect::Exactly(200))
            .await
    }

    /// `DELETE books/delete/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn delete_book(&self, book_id: i64) -> Result<(), ApiError> {
        self.request_empty(Verb::Delete, &delete_book_path(book_id), None::<&()>, Expect::Exactly(200))
            .await
    }

    /// `POST category/add`; expects 201 with the created category.
    ///
    /// # Errors
    ///
    /// Transport, status, or decode failures.
    pub async fn add_category(&self, name: &str) -> Result<Category, ApiError> {
        let body = NameBody { name };
        self.request_json(Verb::Post, "category/add", Some(&body), Expect::Exactly(201))
            .await
    }

    /// `POST category/edit/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn rename_category(&self, category_id: i64, name: &str) -> Result<(), ApiError> {
        let body = NameBody { name };
        self.request_empty(Verb::Post, &edit_category_path(category_id), Some(&body), Expect::Exactly(200))
            .await
    }

    /// `DELETE category/delete/{id}`.
    ///
    /// # Errors
    ///
    /// Transport failures or any status other than 200.
    pub async fn delete_category(&self, category_id: i64) -> Result<(), ApiError> {
        self.request_empty(Verb::Delete, &delete_category_path(category_id), None::<&()>, Expect::Exactly(200))
            .await
    }

    // =========================================================================
    // TRANSPORT
    // =========================================================================

    async fn request_json<B, T>(&self, verb: Verb, path: &str, body: Option<&B>, expect: Expect) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.bearer_token();
        let text = self.send_raw(verb, path, body, token.as_deref(), expect).await?;
        serde_json::from_str(&text).map_err(|e| {
            log::warn!("{} {path}: {e}", verb.as_str());
            ApiError::Decode(e.to_string())
        })
    }

    async fn request_empty<B>(&self, verb: Verb, path: &str, body: Option<&B>, expect: Expect) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let token = self.bearer_token();
        self.send_raw(verb, path, body, token.as_deref(), expect)
            .await
            .map(|_| ())
    }

    /// Send one request and return the response text on the expected status.
    async fn send_raw<B>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
        expect: Expect,
    ) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = self.config.endpoint(path);
            log::debug!("{} {url}", verb.as_str());
            let mut builder = match verb {
                Verb::Get => Request::get(&url),
                Verb::Post => Request::post(&url),
                Verb::Delete => Request::delete(&url),
            };
            if let Some(auth) = bearer_header(token) {
                builder = builder.header("Authorization", &auth);
            }
            let request = match body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let resp = request.send().await.map_err(|e| {
                log::warn!("{} {path} failed: {e}", verb.as_str());
                ApiError::Transport(e.to_string())
            })?;
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if !check_status(status, expect) {
                log::warn!("{} {path} returned {status}", verb.as_str());
                let message = serde_json::from_str::<super::types::ErrorBody>(&text)
                    .ok()
                    .and_then(|b| b.message);
                return Err(ApiError::Status { status, message });
            }
            Ok(text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.config, verb, path, body, token, expect);
            Err(ApiError::Unavailable)
        }
    }
}
