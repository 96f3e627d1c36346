//! Catalogue home page: search, filter, and per-book actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The guarded landing route. Loads books and categories once on mount and
//! hosts the details, book form, and categories dialogs.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::app::{AppSession, current_session};
use crate::components::book_card::BookCard;
use crate::components::book_details_modal::BookDetailsModal;
use crate::components::book_form_modal::{BookFormMode, BookFormModal};
use crate::components::categories_modal::CategoriesModal;
use crate::net::api::ApiClient;
use crate::state::books::{BooksState, has_favorited};
use crate::state::session::SessionState;
use crate::state::toasts::{ToastKind, ToastState, notify, notify_error, notify_success};
use crate::util::task::spawn;

pub const ADMIN_ROLE: &str = "Admin";

/// Notification for a confirmed favorite toggle. `now_favorited` is the new
/// state.
pub fn favorite_message(now_favorited: bool) -> (ToastKind, &'static str) {
    if now_favorited {
        (ToastKind::Success, "Added to Favorites")
    } else {
        (ToastKind::Error, "Removed from Favorites")
    }
}

/// Fallback text for a failed favorite toggle.
pub fn favorite_failure(was_favorited: bool) -> &'static str {
    if was_favorited {
        "Failed to remove book from favorites!"
    } else {
        "Failed to add book to favorites!"
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let session_ctx = expect_context::<AppSession>();
    let books = expect_context::<RwSignal<BooksState>>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let user_id = Signal::derive(move || session.with(|s| s.session().map_or(0, |u| u.id)));
    let user_name = Signal::derive(move || session.with(|s| s.session().map(|u| u.name.clone()).unwrap_or_default()));
    let is_admin = Signal::derive(move || session.with(|s| s.session().is_some_and(|u| u.is_primary(ADMIN_ROLE))));

    let details_book = RwSignal::new(None::<i64>);
    let form_mode = RwSignal::new(None::<BookFormMode>);
    let categories_open = RwSignal::new(false);

    books.update(|s| s.loading = true);
    let load_api = api.clone();
    spawn(async move {
        let (loaded_books, loaded_categories) = (load_api.books().await, load_api.categories().await);
        books.update(|s| {
            match loaded_books {
                Ok(list) => s.books = list,
                Err(e) => log::warn!("failed to load books: {e}"),
            }
            match loaded_categories {
                Ok(list) => s.categories = list,
                Err(e) => log::warn!("failed to load categories: {e}"),
            }
            s.loading = false;
        });
    });

    let favorite_api = api.clone();
    let on_favorite = Callback::new(move |book_id: i64| {
        let Some(user) = current_session(session) else {
            return;
        };
        let Some(was_favorited) = books.with_untracked(|s| s.find(book_id).map(|b| has_favorited(b, user.id)))
        else {
            return;
        };
        let api = favorite_api.clone();
        spawn(async move {
            let result = if was_favorited {
                api.remove_favorite(book_id).await
            } else {
                api.add_favorite(book_id).await
            };
            match result {
                Ok(()) => {
                    books.update(|s| s.toggle_favorite(book_id, user.id));
                    let (kind, message) = favorite_message(!was_favorited);
                    notify(toasts, kind, message);
                }
                Err(e) => notify_error(toasts, e.user_message(favorite_failure(was_favorited))),
            }
        });
    });

    let on_delete = Callback::new(move |book_id: i64| {
        let api = api.clone();
        spawn(async move {
            match api.delete_book(book_id).await {
                Ok(()) => {
                    books.update(|s| s.remove_book(book_id));
                    notify_success(toasts, "Book deleted!");
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to delete book!")),
            }
        });
    });

    let on_view = Callback::new(move |book_id: i64| details_book.set(Some(book_id)));
    let on_edit = Callback::new(move |book_id: i64| form_mode.set(Some(BookFormMode::Edit(book_id))));
    let close_details = Callback::new(move |()| details_book.set(None));
    let close_form = Callback::new(move |()| form_mode.set(None));
    let close_categories = Callback::new(move |()| categories_open.set(false));

    let on_logout = move |_| session_ctx.logout();

    view! {
        <div class="home-page">
            <header class="home-page__header toolbar">
                <span class="toolbar__title">"Bookshelf"</span>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <input
                    class="toolbar__search"
                    type="search"
                    placeholder="Search by title..."
                    prop:value=move || books.with(|s| s.search.clone())
                    on:input=move |ev| books.update(|s| s.search = event_target_value(&ev))
                />
                <select
                    class="toolbar__category"
                    on:change=move |ev| books.update(|s| s.category_filter = event_target_value(&ev))
                >
                    <option value="" selected=move || books.with(|s| s.category_filter.is_empty())>
                        "All categories"
                    </option>
                    {move || {
                        books
                            .with(|s| s.categories.clone())
                            .into_iter()
                            .map(|c| {
                                let name = c.name;
                                let selected_name = name.clone();
                                let value_name = name.clone();
                                view! {
                                    <option
                                        value=value_name
                                        selected=move || books.with(|s| s.category_filter == selected_name)
                                    >
                                        {name}
                                    </option>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </select>
                <Show when=move || is_admin.get()>
                    <button class="btn toolbar__add-book" on:click=move |_| form_mode.set(Some(BookFormMode::Add))>
                        "Add Book"
                    </button>
                    <button class="btn toolbar__categories" on:click=move |_| categories_open.set(true)>
                        "Edit Categories"
                    </button>
                </Show>

                <span class="toolbar__spacer"></span>

                <span class="toolbar__self">{move || user_name.get()}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <div class="home-page__grid">
                <Show
                    when=move || !books.with(|s| s.loading)
                    fallback=move || view! { <p>"Loading books..."</p> }
                >
                    <div class="home-page__cards">
                        {move || {
                            let uid = user_id.get();
                            let admin = is_admin.get();
                            books
                                .with(BooksState::filtered)
                                .into_iter()
                                .map(|book| {
                                    view! {
                                        <BookCard
                                            book=book
                                            user_id=uid
                                            admin=admin
                                            on_view=on_view
                                            on_favorite=on_favorite
                                            on_edit=on_edit
                                            on_delete=on_delete
                                        />
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </div>

            {move || details_book.get().map(|id| view! { <BookDetailsModal book_id=id on_close=close_details/> })}
            {move || form_mode.get().map(|mode| view! { <BookFormModal mode=mode on_close=close_form/> })}
            <Show when=move || categories_open.get()>
                <CategoriesModal on_close=close_categories/>
            </Show>
        </div>
    }
}
