//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render catalogue views and dialogs while reading/writing
//! shared state from Leptos context providers.

pub mod book_card;
pub mod book_details_modal;
pub mod book_form_modal;
pub mod categories_modal;
pub mod comment;
pub mod private_route;
pub mod star_rating;
pub mod toaster;
