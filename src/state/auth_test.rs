use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;

use super::*;
use crate::util::token::test_helpers::token_for;
use crate::util::token_store::MemoryTokenStore;

// =========================================================================
// ScriptedVerifier
// =========================================================================

struct ScriptedVerifier {
    accept: bool,
    calls: Arc<AtomicUsize>,
}

impl ScriptedVerifier {
    fn accepting() -> Self {
        Self { accept: true, calls: Arc::new(AtomicUsize::new(0)) }
    }

    fn rejecting() -> Self {
        Self { accept: false, calls: Arc::new(AtomicUsize::new(0)) }
    }
}

#[async_trait(?Send)]
impl SessionVerifier for ScriptedVerifier {
    async fn verify(&self, token: &str) -> Option<Session> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.accept { token::decode(token).ok() } else { None }
    }
}

/// Verifier that blocks until the test releases it with an answer.
struct GatedVerifier {
    gate: Mutex<Option<oneshot::Receiver<bool>>>,
}

#[async_trait(?Send)]
impl SessionVerifier for GatedVerifier {
    async fn verify(&self, token: &str) -> Option<Session> {
        let rx = self.gate.lock().unwrap().take()?;
        let accept = rx.await.unwrap_or(false);
        if accept { token::decode(token).ok() } else { None }
    }
}

fn alice() -> String {
    token_for(1, "alice", &["User"])
}

fn recorder<S, V>(ctx: &SessionContext<S, V>) -> Arc<Mutex<Vec<SessionState>>>
where
    S: TokenStore,
    V: SessionVerifier,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ctx.subscribe(move |state| sink.lock().unwrap().push(state.clone()));
    seen
}

// =========================================================================
// restore
// =========================================================================

#[test]
fn new_context_is_initializing() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    assert_eq!(ctx.state(), SessionState::Initializing);
    assert!(ctx.session().is_none());
}

#[test]
fn restore_without_token_is_unauthenticated_without_network() {
    let verifier = ScriptedVerifier::accepting();
    let calls = Arc::clone(&verifier.calls);
    let ctx = SessionContext::new(MemoryTokenStore::new(), verifier);

    block_on(ctx.restore());

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn restore_with_accepted_token_authenticates() {
    let store = MemoryTokenStore::with_token(&alice());
    let ctx = SessionContext::new(store.clone(), ScriptedVerifier::accepting());

    block_on(ctx.restore());

    let session = ctx.session().unwrap();
    assert_eq!(session.id, 1);
    assert_eq!(session.name, "alice");
    assert_eq!(store.read(), Some(alice()));
}

#[test]
fn restore_with_rejected_token_clears_store() {
    let store = MemoryTokenStore::with_token(&alice());
    let verifier = ScriptedVerifier::rejecting();
    let calls = Arc::clone(&verifier.calls);
    let ctx = SessionContext::new(store.clone(), verifier);

    block_on(ctx.restore());

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert!(store.read().is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn restore_runs_only_once() {
    let store = MemoryTokenStore::with_token(&alice());
    let verifier = ScriptedVerifier::accepting();
    let calls = Arc::clone(&verifier.calls);
    let ctx = SessionContext::new(store, verifier);

    block_on(ctx.restore());
    block_on(ctx.restore());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn restore_result_is_discarded_after_explicit_login() {
    let (tx, rx) = oneshot::channel();
    let store = MemoryTokenStore::with_token(&alice());
    let verifier = GatedVerifier { gate: Mutex::new(Some(rx)) };
    let ctx = SessionContext::new(store.clone(), verifier);

    let mut restore = Box::pin(ctx.restore());
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(restore.as_mut().poll(&mut cx).is_pending());

    let bob = token_for(2, "bob", &["Admin"]);
    ctx.login(&bob).unwrap();
    tx.send(false).unwrap();
    block_on(restore);

    assert_eq!(ctx.session().unwrap().name, "bob");
    assert_eq!(store.read(), Some(bob));
}

#[test]
fn restore_stays_pending_until_verifier_answers() {
    let (tx, rx) = oneshot::channel();
    let store = MemoryTokenStore::with_token(&alice());
    let ctx = SessionContext::new(store, GatedVerifier { gate: Mutex::new(Some(rx)) });

    let mut restore = Box::pin(ctx.restore());
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);
    assert!(matches!(restore.as_mut().poll(&mut cx), Poll::Pending));
    assert!(ctx.state().is_initializing());

    tx.send(true).unwrap();
    block_on(restore);
    assert_eq!(ctx.session().unwrap().name, "alice");
}

// =========================================================================
// login
// =========================================================================

#[test]
fn login_with_valid_token_authenticates_and_persists() {
    let store = MemoryTokenStore::new();
    let ctx = SessionContext::new(store.clone(), ScriptedVerifier::rejecting());
    let token = token_for(9, "zed", &["Admin", "User"]);

    let session = ctx.login(&token).unwrap();

    assert_eq!(session.roles(), &["Admin".to_owned(), "User".to_owned()]);
    assert_eq!(ctx.state(), SessionState::Authenticated(session));
    assert_eq!(store.read(), Some(token));
}

#[test]
fn login_with_malformed_token_leaves_state_and_store_unchanged() {
    let store = MemoryTokenStore::new();
    let ctx = SessionContext::new(store.clone(), ScriptedVerifier::accepting());
    block_on(ctx.restore());
    let seen = recorder(&ctx);
    let no_roles = token_for(1, "x", &[]);

    for bad in ["", "not-a-jwt", "a.b.c", no_roles.as_str()] {
        let err = ctx.login(bad).unwrap_err();
        assert!(matches!(err, SessionError::MalformedToken(_)));
    }

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert!(store.read().is_none());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn malformed_login_keeps_existing_session() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    ctx.login(&alice()).unwrap();

    assert!(ctx.login("garbage").is_err());

    assert_eq!(ctx.session().unwrap().name, "alice");
}

#[test]
fn login_works_while_initializing() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    ctx.login(&alice()).unwrap();
    assert!(ctx.session().is_some());
}

// =========================================================================
// logout
// =========================================================================

#[test]
fn logout_from_authenticated_clears_store() {
    let store = MemoryTokenStore::new();
    let ctx = SessionContext::new(store.clone(), ScriptedVerifier::accepting());
    ctx.login(&alice()).unwrap();

    ctx.logout();

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert!(store.read().is_none());
}

#[test]
fn logout_from_initializing_is_unauthenticated() {
    let store = MemoryTokenStore::with_token(&alice());
    let ctx = SessionContext::new(store.clone(), ScriptedVerifier::accepting());

    ctx.logout();

    assert_eq!(ctx.state(), SessionState::Unauthenticated);
    assert!(store.read().is_none());
}

#[test]
fn logout_when_already_unauthenticated_is_idempotent() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    ctx.logout();
    ctx.logout();
    assert_eq!(ctx.state(), SessionState::Unauthenticated);
}

// =========================================================================
// subscriptions
// =========================================================================

#[test]
fn subscribers_see_every_transition_in_order() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    let seen = recorder(&ctx);

    block_on(ctx.restore());
    let session = ctx.login(&alice()).unwrap();
    ctx.logout();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            SessionState::Unauthenticated,
            SessionState::Authenticated(session),
            SessionState::Unauthenticated,
        ]
    );
}

#[test]
fn unsubscribe_stops_notifications() {
    let ctx = SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting());
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let id = ctx.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    ctx.logout();
    assert!(ctx.unsubscribe(id));
    ctx.logout();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!ctx.unsubscribe(id));
}

#[test]
fn subscription_stays_attached_until_unsubscribed() {
    let ctx = SessionContext::new(MemoryTokenStore::with_token(&alice()), ScriptedVerifier::accepting());
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let id = ctx.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    block_on(ctx.restore());
    ctx.logout();
    ctx.login(&alice()).unwrap();
    ctx.logout();

    assert_eq!(count.load(Ordering::SeqCst), 4);
    assert!(ctx.unsubscribe(id));
}

#[test]
fn subscriber_can_read_state_reentrantly() {
    let ctx = Arc::new(SessionContext::new(MemoryTokenStore::new(), ScriptedVerifier::accepting()));
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let weak = Arc::downgrade(&ctx);
    ctx.subscribe(move |_| {
        if let Some(ctx) = weak.upgrade() {
            *sink.lock().unwrap() = Some(ctx.state());
        }
    });

    ctx.login(&alice()).unwrap();

    let observed = observed.lock().unwrap().clone().unwrap();
    assert_eq!(observed.session().unwrap().name, "alice");
}
