//! Transient notification (toast) state.
//!
//! DESIGN
//! ======
//! The queue is bounded: pushing past the visible limit evicts the oldest
//! toast. Expiry is driven from outside via [`notify`], which schedules a
//! dismiss by id so a toast already evicted is never resurrected.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use leptos::prelude::*;

use crate::config::MAX_VISIBLE_NOTIFICATIONS;
#[cfg(feature = "csr")]
use crate::config::NOTIFICATION_TTL_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Error => "toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message: message.into() });
        if self.items.len() > MAX_VISIBLE_NOTIFICATIONS {
            let overflow = self.items.len() - MAX_VISIBLE_NOTIFICATIONS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }
}

/// Show a toast and schedule its auto-dismiss.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
        ToastKind::Success => log::debug!("toast: {message}"),
        ToastKind::Error => log::warn!("toast: {message}"),
    }
    let Some(id) = toasts.try_update(|state| state.push(kind, message)) else {
        return;
    };
    schedule_dismiss(toasts, id);
}

#[cfg(feature = "csr")]
fn schedule_dismiss(toasts: RwSignal<ToastState>, id: u64) {
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(NOTIFICATION_TTL_MS)).await;
        toasts.update(|state| {
            state.dismiss(id);
        });
    });
}

#[cfg(not(feature = "csr"))]
fn schedule_dismiss(_toasts: RwSignal<ToastState>, _id: u64) {}

pub fn notify_success(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    notify(toasts, ToastKind::Success, message);
}

pub fn notify_error(toasts: RwSignal<ToastState>, message: impl Into<String>) {
    notify(toasts, ToastKind::Error, message);
}
