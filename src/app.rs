//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::private_route::PrivateRoute;
use crate::components::toaster::Toaster;
use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::verify::HttpVerifier;
use crate::pages::{home::HomePage, login::LoginPage};
use crate::state::auth::SessionContext;
use crate::state::books::BooksState;
use crate::state::session::{Session, SessionState};
use crate::state::toasts::ToastState;
use crate::util::task::spawn;
use crate::util::token_store::LocalStorageTokenStore;

/// Roles allowed onto the catalogue home route.
pub const HOME_ROLES: &[&str] = &["User", "Admin"];

/// Session context as wired in the browser.
pub type AppSession = Arc<SessionContext<LocalStorageTokenStore, HttpVerifier>>;

/// Root application component.
///
/// Owns the session context, mirrors its transitions into a signal for the
/// views, and kicks off boot-time restore.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let api = ApiClient::new(config.clone());
    let session_ctx: AppSession = Arc::new(SessionContext::new(LocalStorageTokenStore, HttpVerifier::new(api.clone())));

    let session = RwSignal::new(session_ctx.state());
    // Lives as long as the app: the root component is only torn down with the page.
    let subscription = session_ctx.subscribe(move |state| session.set(state.clone()));
    let cleanup_ctx = Arc::clone(&session_ctx);
    on_cleanup(move || {
        cleanup_ctx.unsubscribe(subscription);
    });

    let restore_ctx = Arc::clone(&session_ctx);
    spawn(async move {
        restore_ctx.restore().await;
    });

    provide_context(config);
    provide_context(api);
    provide_context(session_ctx);
    provide_context(session);
    provide_context(RwSignal::new(BooksState::default()));
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Title text="Bookshelf"/>

        <Router>
            <Toaster/>
            <Routes fallback=|| view! { <h1 class="not-found">"404 Page Not Found"</h1> }>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route
                    path=StaticSegment("")
                    view=|| view! {
                        <PrivateRoute roles=HOME_ROLES>
                            <HomePage/>
                        </PrivateRoute>
                    }
                />
            </Routes>
        </Router>
    }
}

/// The signed-in session, untracked. `None` unless authenticated.
pub fn current_session(session: RwSignal<SessionState>) -> Option<Session> {
    session.with_untracked(|state| state.session().cloned())
}
