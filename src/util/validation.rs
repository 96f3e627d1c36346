//! Client-side form validation for the login, book, comment, and category
//! forms.
//!
//! Each validator returns the request payload on success or the exact
//! notification text on failure, so views only forward the error string.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::net::types::{BookPayload, LoginRequest, RegisterRequest};

pub const FILL_ALL_FIELDS: &str = "Please fill out all fields!";
pub const UPLOAD_IMAGE: &str = "Please upload an image!";
pub const SHORT_FIELDS: &str = "Title, description, and ISBN must be at least 3 characters long!";
pub const SHORT_DESCRIPTION: &str = "Description must be at least 10 characters long!";
pub const PAGES_TOO_LOW: &str = "Page count must be at least 1!";
pub const SHORT_COMMENT: &str = "Comment must be at least 3 characters long!";
pub const EMPTY_CATEGORY: &str = "Please enter a category name!";
pub const DUPLICATE_CATEGORY: &str = "Category with this name already exists!";
pub const EMPTY_RENAME: &str = "Please enter a new category name!";

/// Raw book form input as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub description: String,
    pub isbn: String,
    pub pages: String,
    pub category_id: Option<i64>,
    /// Cover image as a data URL.
    pub image: Option<String>,
}

impl BookForm {
    /// Prefill from an existing book for editing.
    pub fn from_book(book: &crate::net::types::Book) -> Self {
        Self {
            title: book.title.clone(),
            description: book.description.clone(),
            isbn: book.isbn.clone(),
            pages: book.pages.to_string(),
            category_id: Some(book.category.id),
            image: book.base64.clone().filter(|data| !data.is_empty()),
        }
    }
}

/// Validate the add/edit book form, checking in a fixed order so the first
/// problem reported is stable.
///
/// # Errors
///
/// The notification text for the first failed check.
pub fn validate_book_form(form: &BookForm) -> Result<BookPayload, &'static str> {
    let pages = parse_leading_int(&form.pages).filter(|n| *n != 0);
    let (Some(pages), Some(cat_id)) = (pages, form.category_id) else {
        return Err(FILL_ALL_FIELDS);
    };
    if form.title.is_empty() || form.description.is_empty() || form.isbn.is_empty() {
        return Err(FILL_ALL_FIELDS);
    }
    let Some(image) = form.image.as_deref().filter(|data| !data.is_empty()) else {
        return Err(UPLOAD_IMAGE);
    };
    if char_len(&form.title) < 3 || char_len(&form.description) < 3 || char_len(&form.isbn) < 3 {
        return Err(SHORT_FIELDS);
    }
    if char_len(&form.description) < 10 {
        return Err(SHORT_DESCRIPTION);
    }
    if pages < 1 {
        return Err(PAGES_TOO_LOW);
    }
    Ok(BookPayload {
        title: form.title.clone(),
        description: form.description.clone(),
        isbn: form.isbn.clone(),
        base64: image.to_owned(),
        pages,
        cat_id,
    })
}

/// # Errors
///
/// [`SHORT_COMMENT`] when the comment has fewer than 3 characters.
pub fn validate_comment(text: &str) -> Result<&str, &'static str> {
    if char_len(text) < 3 { Err(SHORT_COMMENT) } else { Ok(text) }
}

/// Check a new category name against the existing ones.
///
/// # Errors
///
/// [`EMPTY_CATEGORY`] or [`DUPLICATE_CATEGORY`].
pub fn validate_new_category(name: &str, taken: impl Fn(&str) -> bool) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EMPTY_CATEGORY);
    }
    if taken(name) {
        return Err(DUPLICATE_CATEGORY);
    }
    Ok(name.to_owned())
}

/// # Errors
///
/// [`EMPTY_RENAME`] when the new name is blank.
pub fn validate_rename(name: &str) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() { Err(EMPTY_RENAME) } else { Ok(name.to_owned()) }
}

/// # Errors
///
/// [`FILL_ALL_FIELDS`] when either field is blank.
pub fn validate_login_input(username: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(FILL_ALL_FIELDS);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// # Errors
///
/// [`FILL_ALL_FIELDS`] when any field is blank. Password confirmation is
/// checked by the server.
pub fn validate_register_input(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterRequest, &'static str> {
    let username = username.trim();
    let email = email.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(FILL_ALL_FIELDS);
    }
    Ok(RegisterRequest {
        username: username.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
    })
}

/// Leading base-10 integer of `raw` (`"12abc"` -> 12), ignoring leading
/// whitespace. `None` when no digits lead the string.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
