//! Persistence for the single bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session context is the only writer. Resource clients read the token
//! on every request to build the `Authorization` header.
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is best-effort: when `localStorage` is unavailable the
//! token simply does not survive a reload.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, Mutex, PoisonError};

/// `localStorage` key holding the raw token. Absence means logged out.
pub const STORAGE_KEY: &str = "token";

/// Storage for one token string, replaced wholesale on every save.
pub trait TokenStore {
    /// Current token, or `None` when absent or empty.
    fn read(&self) -> Option<String>;
    /// Persist `token`, replacing any prior value.
    fn save(&self, token: &str);
    /// Remove the stored token.
    fn clear(&self);
}

/// Token store backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for LocalStorageTokenStore {
    fn read(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
            non_empty(raw)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; session will not persist");
                return;
            };
            storage_write_ok(storage.set_item(STORAGE_KEY, token), "persist");
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; stale session token may remain");
                return;
            };
            storage_write_ok(storage.remove_item(STORAGE_KEY), "clear");
        }
    }
}

/// In-memory token store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(token);
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone().and_then(non_empty)
    }

    fn save(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Log a failed storage write. Returns whether it succeeded.
#[cfg(any(test, feature = "csr"))]
fn storage_write_ok<E>(result: Result<(), E>, action: &str) -> bool {
    if result.is_err() {
        log::warn!("failed to {action} session token");
        return false;
    }
    true
}

fn non_empty(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}
