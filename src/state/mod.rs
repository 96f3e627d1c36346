//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `books`, `toasts`) so individual
//! components can depend on small focused models.

pub mod auth;
pub mod books;
pub mod session;
pub mod toasts;
