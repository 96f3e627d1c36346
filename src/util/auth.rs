//! Route-guard policy shared by protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes must agree on when to wait, render, or bounce to
//! `/login`, so the decision lives here rather than in each page.
//!
//! Only the user's primary (first-listed) role is compared against the
//! route's role list. A user whose roles are `["User", "Admin"]` does not
//! pass an `["Admin"]` route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

pub const LOGIN_PATH: &str = "/login";

/// What a protected route should do for the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still initializing: render nothing, decide later.
    Wait,
    /// Render the protected content.
    Allow,
    /// Send the visitor to the login view.
    Redirect,
}

/// Decide access for `state` against the route's `required` roles.
pub fn guard_decision(state: &SessionState, required: &[&str]) -> GuardDecision {
    match state {
        SessionState::Initializing => GuardDecision::Wait,
        SessionState::Unauthenticated => GuardDecision::Redirect,
        SessionState::Authenticated(session) => {
            if required.iter().any(|role| *role == session.primary_role()) {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect
            }
        }
    }
}

/// Navigate to `/login` whenever the guard decision becomes `Redirect`.
pub fn install_guard_redirect<F>(session: RwSignal<SessionState>, required: &'static [&'static str], navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let state = session.get();
        if guard_decision(&state, required) == GuardDecision::Redirect {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
