//! REST access to the catalogue backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns transport and status handling, `types` the wire DTOs, and
//! `verify` the server-side token check used at boot.

pub mod api;
pub mod types;
pub mod verify;
