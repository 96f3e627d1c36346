//! # bookshelf
//!
//! Leptos + WASM front-end for the book catalogue. Users sign in, browse and
//! filter books, rate, comment on, and favorite them; administrators manage
//! books and categories.
//!
//! The session layer (`state::auth`, `util::token`, `util::token_store`,
//! `net::verify`) is plain Rust and unit-tested natively. Browser bindings
//! are compiled in by the `csr` feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
