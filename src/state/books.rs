//! Catalogue state for the home view: books, categories, and filters.
//!
//! DESIGN
//! ======
//! Local collections are only patched after the server confirmed the
//! matching request, so each mutator here mirrors one successful response.
//! Failed requests never reach these methods.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use crate::net::types::{Book, BookPayload, BookRating, Category, Favorite};

/// Shown when a book has no cover.
pub const PLACEHOLDER_COVER: &str =
    "https://www.pngkey.com/png/full/26-261029_book-png-jpg-royalty-free-library-thick-book.png";

/// Catalogue collections plus the active filters.
#[derive(Clone, Debug, Default)]
pub struct BooksState {
    pub books: Vec<Book>,
    pub categories: Vec<Category>,
    /// Case-insensitive title substring.
    pub search: String,
    /// Exact category name; empty means all categories.
    pub category_filter: String,
    pub loading: bool,
}

impl BooksState {
    /// Books matching the title search and category filter, in list order.
    pub fn filtered(&self) -> Vec<Book> {
        let needle = self.search.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .filter(|book| self.category_filter.is_empty() || book.category.name == self.category_filter)
            .cloned()
            .collect()
    }

    pub fn find(&self, book_id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == book_id)
    }

    fn find_mut(&mut self, book_id: i64) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == book_id)
    }

    /// Flip `user_id`'s favorite on a book after the server confirmed it.
    pub fn toggle_favorite(&mut self, book_id: i64, user_id: i64) {
        let Some(book) = self.find_mut(book_id) else {
            return;
        };
        if has_favorited(book, user_id) {
            book.favorited_by_users.retain(|fav| fav.userid != user_id);
        } else {
            book.favorited_by_users.push(Favorite { userid: user_id });
        }
    }

    /// Set, replace, or (with `None`) remove `user_id`'s rating.
    pub fn apply_rating(&mut self, book_id: i64, user_id: i64, rating: Option<u8>) {
        let Some(book) = self.find_mut(book_id) else {
            return;
        };
        let existing = book.book_ratings.iter_mut().find(|r| r.userid == user_id);
        match (existing, rating) {
            (Some(entry), Some(value)) => entry.rating = value,
            (Some(_), None) => book.book_ratings.retain(|r| r.userid != user_id),
            (None, Some(value)) => book.book_ratings.push(BookRating { userid: user_id, rating: value }),
            (None, None) => {}
        }
    }

    /// Append a book the server just created.
    pub fn insert_book(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Merge an accepted edit into the local book.
    ///
    /// The category name is taken from the known categories; an unknown id
    /// keeps the previous category.
    pub fn apply_edit(&mut self, book_id: i64, payload: &BookPayload) {
        let category = self.categories.iter().find(|c| c.id == payload.cat_id).cloned();
        let Some(book) = self.find_mut(book_id) else {
            return;
        };
        book.title.clone_from(&payload.title);
        book.description.clone_from(&payload.description);
        book.isbn.clone_from(&payload.isbn);
        book.base64 = Some(payload.base64.clone());
        book.pages = payload.pages;
        if let Some(category) = category {
            book.category = category;
        }
    }

    pub fn remove_book(&mut self, book_id: i64) {
        self.books.retain(|book| book.id != book_id);
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    /// Rename a category everywhere it appears, including on books.
    pub fn rename_category(&mut self, category_id: i64, name: &str) {
        for category in self.categories.iter_mut().filter(|c| c.id == category_id) {
            name.clone_into(&mut category.name);
        }
        for book in self.books.iter_mut().filter(|b| b.category.id == category_id) {
            name.clone_into(&mut book.category.name);
        }
    }

    /// Remove a category together with every book filed under it.
    pub fn remove_category(&mut self, category_id: i64) {
        let removed_name = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone());
        self.categories.retain(|c| c.id != category_id);
        self.books.retain(|b| b.category.id != category_id);
        if removed_name.is_some_and(|name| name == self.category_filter) {
            self.category_filter.clear();
        }
    }

    /// Whether a category named `name` already exists, ignoring case.
    pub fn category_name_taken(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.categories.iter().any(|c| c.name.to_lowercase() == lowered)
    }
}

pub fn has_favorited(book: &Book, user_id: i64) -> bool {
    book.favorited_by_users.iter().any(|fav| fav.userid == user_id)
}

/// Mean star rating; 0 when unrated.
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(ratings: &[BookRating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| u32::from(r.rating)).sum();
    f64::from(sum) / ratings.len() as f64
}

/// `user_id`'s rating of `book`, 0 when not rated.
pub fn user_rating(book: &Book, user_id: i64) -> u8 {
    book.book_ratings
        .iter()
        .find(|r| r.userid == user_id)
        .map_or(0, |r| r.rating)
}

/// `src` attribute for a cover image.
///
/// Uploaded covers are stored as full data URLs; older records hold bare
/// base64 JPEG bytes.
pub fn cover_src(book: &Book) -> String {
    match book.base64.as_deref() {
        None | Some("") => PLACEHOLDER_COVER.to_owned(),
        Some(data) if data.starts_with("data:") => data.to_owned(),
        Some(data) => format!("data:image/jpeg;base64,{data}"),
    }
}
