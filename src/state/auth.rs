//! Session context: the client's authentication state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owned by the app root and injected into views and the route guard. It is
//! the single writer of the token store; consumers subscribe to transitions
//! instead of reading ambient globals.
//!
//! DESIGN
//! ======
//! `Initializing --restore--> Authenticated | Unauthenticated`, after which
//! only `login`/`logout` move the state. Subscribers run after the internal
//! lock is released, so a subscriber may read `state()` re-entrantly and
//! always sees the value it was notified about.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::session::{Session, SessionError, SessionState};
use crate::net::verify::SessionVerifier;
use crate::util::token;
use crate::util::token_store::TokenStore;

type Subscriber = Arc<dyn Fn(&SessionState) + Send + Sync>;

/// Handle returned by [`SessionContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Inner {
    state: SessionState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

/// Authentication state plus the token store and verifier it is built from.
pub struct SessionContext<S, V> {
    store: S,
    verifier: V,
    inner: Mutex<Inner>,
}

impl<S, V> SessionContext<S, V>
where
    S: TokenStore,
    V: SessionVerifier,
{
    /// A context in `Initializing`. Call [`Self::restore`] once at boot.
    pub fn new(store: S, verifier: V) -> Self {
        Self { store, verifier, inner: Mutex::new(Inner::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// The current session, if authenticated.
    pub fn session(&self) -> Option<Session> {
        self.lock().state.session().cloned()
    }

    /// Register `callback` for every subsequent transition.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.subscribers.push((id, Arc::new(callback)));
        id
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// Boot-time restore: verify a stored token, or settle as logged out.
    ///
    /// Without a stored token no network call is made. A rejected token is
    /// cleared from the store. If `login`/`logout` already moved the state
    /// while verification was in flight, the verification result is dropped.
    pub async fn restore(&self) {
        if !self.lock().state.is_initializing() {
            return;
        }
        let Some(stored) = self.store.read() else {
            log::info!("no stored session");
            self.transition(SessionState::Unauthenticated);
            return;
        };

        let verified = self.verifier.verify(&stored).await;
        if !self.lock().state.is_initializing() {
            log::debug!("session changed during verification; discarding result");
            return;
        }
        match verified {
            Some(session) => self.transition(SessionState::Authenticated(session)),
            None => {
                self.store.clear();
                self.transition(SessionState::Unauthenticated);
            }
        }
    }

    /// Adopt a freshly issued token.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedToken`] if the token does not decode; the
    /// state and the store are left untouched.
    pub fn login(&self, raw_token: &str) -> Result<Session, SessionError> {
        let session = token::decode(raw_token)?;
        self.store.save(raw_token);
        self.transition(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Forget the token and become `Unauthenticated`.
    pub fn logout(&self) {
        self.store.clear();
        self.transition(SessionState::Unauthenticated);
    }

    fn transition(&self, next: SessionState) {
        match &next {
            SessionState::Authenticated(session) => {
                log::info!("session authenticated: user {} ({})", session.id, session.primary_role());
            }
            SessionState::Unauthenticated => log::info!("session unauthenticated"),
            SessionState::Initializing => {}
        }
        let subscribers: Vec<Subscriber> = {
            let mut inner = self.lock();
            inner.state = next.clone();
            inner.subscribers.iter().map(|(_, sub)| Arc::clone(sub)).collect()
        };
        for subscriber in subscribers {
            subscriber(&next);
        }
    }
}
