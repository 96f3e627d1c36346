use super::*;

fn category(id: i64, name: &str) -> Category {
    Category { id, name: name.to_owned() }
}

fn book(id: i64, title: &str, cat: &Category) -> Book {
    Book {
        id,
        title: title.to_owned(),
        description: "A long enough description".to_owned(),
        isbn: "978".to_owned(),
        base64: None,
        pages: 100,
        category: cat.clone(),
        book_ratings: Vec::new(),
        favorited_by_users: Vec::new(),
    }
}

fn sample() -> BooksState {
    let fiction = category(1, "Fiction");
    let science = category(2, "Science");
    BooksState {
        books: vec![
            book(10, "Dune", &fiction),
            book(11, "Cosmos", &science),
            book(12, "Dune Messiah", &fiction),
        ],
        categories: vec![fiction, science],
        ..BooksState::default()
    }
}

fn ids(books: &[Book]) -> Vec<i64> {
    books.iter().map(|b| b.id).collect()
}

// =============================================================
// filtered
// =============================================================

#[test]
fn filtered_without_filters_returns_all_in_order() {
    assert_eq!(ids(&sample().filtered()), vec![10, 11, 12]);
}

#[test]
fn filtered_matches_title_case_insensitively() {
    let mut state = sample();
    state.search = "dUNE".to_owned();
    assert_eq!(ids(&state.filtered()), vec![10, 12]);
}

#[test]
fn filtered_by_category_name() {
    let mut state = sample();
    state.category_filter = "Science".to_owned();
    assert_eq!(ids(&state.filtered()), vec![11]);
}

#[test]
fn filtered_combines_search_and_category() {
    let mut state = sample();
    state.search = "messiah".to_owned();
    state.category_filter = "Fiction".to_owned();
    assert_eq!(ids(&state.filtered()), vec![12]);
    state.category_filter = "Science".to_owned();
    assert!(state.filtered().is_empty());
}

// =============================================================
// favorites and ratings
// =============================================================

#[test]
fn toggle_favorite_adds_then_removes() {
    let mut state = sample();
    state.toggle_favorite(10, 7);
    assert!(has_favorited(state.find(10).unwrap(), 7));
    state.toggle_favorite(10, 7);
    assert!(!has_favorited(state.find(10).unwrap(), 7));
}

#[test]
fn toggle_favorite_leaves_other_users() {
    let mut state = sample();
    state.toggle_favorite(10, 7);
    state.toggle_favorite(10, 8);
    state.toggle_favorite(10, 7);
    assert_eq!(state.find(10).unwrap().favorited_by_users, vec![Favorite { userid: 8 }]);
}

#[test]
fn apply_rating_sets_replaces_and_removes() {
    let mut state = sample();
    state.apply_rating(10, 7, Some(4));
    assert_eq!(user_rating(state.find(10).unwrap(), 7), 4);
    state.apply_rating(10, 7, Some(2));
    assert_eq!(state.find(10).unwrap().book_ratings.len(), 1);
    assert_eq!(user_rating(state.find(10).unwrap(), 7), 2);
    state.apply_rating(10, 7, None);
    assert!(state.find(10).unwrap().book_ratings.is_empty());
}

#[test]
fn clearing_missing_rating_is_noop() {
    let mut state = sample();
    state.apply_rating(10, 7, None);
    assert!(state.find(10).unwrap().book_ratings.is_empty());
}

#[test]
fn average_rating_of_empty_is_zero() {
    assert!(average_rating(&[]).abs() < f64::EPSILON);
}

#[test]
fn average_rating_is_mean() {
    let ratings = vec![
        BookRating { userid: 1, rating: 5 },
        BookRating { userid: 2, rating: 2 },
    ];
    assert!((average_rating(&ratings) - 3.5).abs() < f64::EPSILON);
}

// =============================================================
// book mutations
// =============================================================

#[test]
fn insert_and_remove_book() {
    let mut state = sample();
    let extra = book(13, "Contact", &category(2, "Science"));
    state.insert_book(extra.clone());
    assert_eq!(state.find(13), Some(&extra));
    state.remove_book(13);
    assert!(state.find(13).is_none());
    assert_eq!(state.books.len(), 3);
}

#[test]
fn apply_edit_updates_fields_and_category() {
    let mut state = sample();
    let payload = BookPayload {
        title: "Dune (1965)".to_owned(),
        description: "Desert planet epic".to_owned(),
        isbn: "0441013597".to_owned(),
        base64: "data:image/png;base64,AAAA".to_owned(),
        pages: 412,
        cat_id: 2,
    };
    state.apply_edit(10, &payload);
    let edited = state.find(10).unwrap();
    assert_eq!(edited.title, "Dune (1965)");
    assert_eq!(edited.pages, 412);
    assert_eq!(edited.base64.as_deref(), Some("data:image/png;base64,AAAA"));
    assert_eq!(edited.category, category(2, "Science"));
}

#[test]
fn apply_edit_with_unknown_category_keeps_previous() {
    let mut state = sample();
    let payload = BookPayload {
        title: "Dune".to_owned(),
        description: "Desert planet epic".to_owned(),
        isbn: "0441013597".to_owned(),
        base64: String::new(),
        pages: 1,
        cat_id: 99,
    };
    state.apply_edit(10, &payload);
    assert_eq!(state.find(10).unwrap().category.name, "Fiction");
}

// =============================================================
// category mutations
// =============================================================

#[test]
fn rename_category_cascades_to_books() {
    let mut state = sample();
    state.rename_category(1, "Novels");
    assert_eq!(state.categories[0].name, "Novels");
    assert_eq!(state.find(10).unwrap().category.name, "Novels");
    assert_eq!(state.find(12).unwrap().category.name, "Novels");
    assert_eq!(state.find(11).unwrap().category.name, "Science");
}

#[test]
fn remove_category_drops_its_books() {
    let mut state = sample();
    state.remove_category(1);
    assert_eq!(state.categories, vec![category(2, "Science")]);
    assert_eq!(ids(&state.books), vec![11]);
}

#[test]
fn remove_category_resets_matching_filter() {
    let mut state = sample();
    state.category_filter = "Fiction".to_owned();
    state.remove_category(1);
    assert!(state.category_filter.is_empty());

    let mut state = sample();
    state.category_filter = "Science".to_owned();
    state.remove_category(1);
    assert_eq!(state.category_filter, "Science");
}

#[test]
fn category_name_taken_ignores_case() {
    let state = sample();
    assert!(state.category_name_taken("fiction"));
    assert!(state.category_name_taken("SCIENCE"));
    assert!(!state.category_name_taken("History"));
}

#[test]
fn insert_category_appends() {
    let mut state = sample();
    state.insert_category(category(3, "History"));
    assert!(state.category_name_taken("history"));
}

// =============================================================
// cover_src
// =============================================================

#[test]
fn cover_src_placeholder_when_missing() {
    let mut b = book(1, "x", &category(1, "c"));
    assert_eq!(cover_src(&b), PLACEHOLDER_COVER);
    b.base64 = Some(String::new());
    assert_eq!(cover_src(&b), PLACEHOLDER_COVER);
}

#[test]
fn cover_src_keeps_data_urls_and_prefixes_bare_base64() {
    let mut b = book(1, "x", &category(1, "c"));
    b.base64 = Some("data:image/png;base64,QUJD".to_owned());
    assert_eq!(cover_src(&b), "data:image/png;base64,QUJD");
    b.base64 = Some("QUJD".to_owned());
    assert_eq!(cover_src(&b), "data:image/jpeg;base64,QUJD");
}
