//! Login page with a register toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only public route. A successful login hands the issued token to the
//! session context and navigates home; the guard does the rest.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::{AppSession, HOME_ROLES};
use crate::net::api::ApiError;
use crate::state::session::SessionState;
use crate::state::toasts::{ToastState, notify_error, notify_success};
use crate::util::auth::{GuardDecision, guard_decision};
use crate::util::task::spawn;
use crate::util::validation::{validate_login_input, validate_register_input};

pub const BAD_CREDENTIALS: &str = "Bad Username or Password";
pub const SERVER_ERROR: &str = "Server error";
pub const REGISTERED: &str = "Successfully registered!";
pub const INVALID_TOKEN: &str = "Login failed: the server returned an invalid session token";

pub fn login_welcome(username: &str) -> String {
    format!("Logged in, welcome back {username}!")
}

/// Notification for a failed `auth/login`.
pub fn login_failure_message(err: &ApiError) -> String {
    match err.status() {
        Some(400) => BAD_CREDENTIALS.to_owned(),
        _ => SERVER_ERROR.to_owned(),
    }
}

/// Notification for a failed `auth/register`: the backend's reason on 400.
pub fn register_failure_message(err: &ApiError) -> String {
    match (err.status(), err.server_message()) {
        (Some(400), Some(message)) => message.to_owned(),
        _ => SERVER_ERROR.to_owned(),
    }
}

/// Whether the login page should hand off to `/`. Only sessions the home
/// guard would admit leave; anyone else stays here so they can sign in again.
pub fn should_leave_login(state: &SessionState) -> bool {
    guard_decision(state, HOME_ROLES) == GuardDecision::Allow
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let session_ctx = expect_context::<AppSession>();
    let api = expect_context::<crate::net::api::ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    // Already signed in: nothing to do here.
    let navigate_home = navigate.clone();
    Effect::new(move || {
        if session.with(should_leave_login) {
            navigate_home("/", NavigateOptions::default());
        }
    });

    let is_login = RwSignal::new(true);
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let reset = move || {
        username.set(String::new());
        email.set(String::new());
        password.set(String::new());
        confirm_password.set(String::new());
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }

        if is_login.get_untracked() {
            let request = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
                Ok(request) => request,
                Err(message) => {
                    notify_error(toasts, message);
                    return;
                }
            };
            busy.set(true);
            let api = api.clone();
            let ctx = Arc::clone(&session_ctx);
            let navigate = navigate.clone();
            spawn(async move {
                let outcome = api.login(&request).await;
                busy.set(false);
                match outcome {
                    Ok(token) => match ctx.login(&token) {
                        Ok(_) => {
                            notify_success(toasts, login_welcome(&request.username));
                            navigate("/", NavigateOptions::default());
                            return;
                        }
                        Err(e) => {
                            log::warn!("login rejected: {e}");
                            notify_error(toasts, INVALID_TOKEN);
                        }
                    },
                    Err(e) => notify_error(toasts, login_failure_message(&e)),
                }
                reset();
            });
        } else {
            let request = match validate_register_input(
                &username.get_untracked(),
                &email.get_untracked(),
                &password.get_untracked(),
                &confirm_password.get_untracked(),
            ) {
                Ok(request) => request,
                Err(message) => {
                    notify_error(toasts, message);
                    return;
                }
            };
            busy.set(true);
            let api = api.clone();
            spawn(async move {
                let outcome = api.register(&request).await;
                busy.set(false);
                match outcome {
                    Ok(()) => {
                        notify_success(toasts, REGISTERED);
                        is_login.set(true);
                    }
                    Err(e) => notify_error(toasts, register_failure_message(&e)),
                }
                reset();
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || if is_login.get() { "Login" } else { "Register" }}</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <Show when=move || !is_login.get()>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="Email Address"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || !is_login.get()>
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm Password"
                            autocomplete="new-password"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if is_login.get() { "Login" } else { "Register" }}
                    </button>
                </form>
                <a
                    href="#"
                    class="login-toggle"
                    on:click=move |ev| {
                        ev.prevent_default();
                        is_login.update(|v| *v = !*v);
                    }
                >
                    {move || {
                        if is_login.get() { "Don't have an account? Sign Up" } else { "Have an account? Sign In" }
                    }}
                </a>
            </div>
        </div>
    }
}
