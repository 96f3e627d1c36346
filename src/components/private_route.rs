//! Route guard wrapper for protected pages.
//!
//! DESIGN
//! ======
//! Rendering and redirecting both derive from `guard_decision`, so protected
//! content is never shown for a state that would also trigger a redirect.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
use crate::util::auth::{GuardDecision, guard_decision, install_guard_redirect};

/// Render `children` only for a session whose primary role is in `roles`.
/// Renders nothing while the session is initializing.
#[component]
pub fn PrivateRoute(roles: &'static [&'static str], children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_guard_redirect(session, roles, use_navigate());

    view! {
        <Show when=move || session.with(|state| guard_decision(state, roles) == GuardDecision::Allow)>
            {children()}
        </Show>
    }
}
