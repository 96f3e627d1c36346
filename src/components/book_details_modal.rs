//! Book details dialog with the viewer's rating and the comment thread.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from a home-page card. Ratings patch the shared catalogue state so
//! the card behind the dialog updates too; comments are local to the dialog
//! and fetched once when it opens.

#[cfg(test)]
#[path = "book_details_modal_test.rs"]
mod book_details_modal_test;

use leptos::prelude::*;

use crate::app::current_session;
use crate::components::comment::CommentItem;
use crate::components::star_rating::StarRating;
use crate::net::api::ApiClient;
use crate::net::types::Comment;
use crate::state::books::{BooksState, user_rating};
use crate::state::session::SessionState;
use crate::state::toasts::{ToastKind, ToastState, notify, notify_error, notify_success};
use crate::util::task::spawn;
use crate::util::validation::validate_comment;

/// Notification for a confirmed rating change. `None` means cleared.
pub fn rating_message(title: &str, rating: Option<u8>) -> (ToastKind, String) {
    match rating {
        Some(stars) => (ToastKind::Success, format!("Rated \"{title}\" {stars} stars!")),
        None => (ToastKind::Error, format!("Removed rating for \"{title}\"")),
    }
}

/// Comments in display order, newest first.
pub fn newest_first(comments: &[Comment]) -> Vec<Comment> {
    comments.iter().rev().cloned().collect()
}

#[component]
pub fn BookDetailsModal(book_id: i64, on_close: Callback<()>) -> impl IntoView {
    let books = expect_context::<RwSignal<BooksState>>();
    let session = expect_context::<RwSignal<SessionState>>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let book = Memo::new(move |_| books.with(|s| s.find(book_id).cloned()));
    let my_rating = Signal::derive(move || {
        let user_id = session.with(|s| s.session().map(|u| u.id));
        match (book.get(), user_id) {
            (Some(book), Some(user_id)) => user_rating(&book, user_id),
            _ => 0,
        }
    });

    let comments = RwSignal::new(Vec::<Comment>::new());
    let draft = RwSignal::new(String::new());

    let fetch_api = api.clone();
    spawn(async move {
        match fetch_api.comments(book_id).await {
            Ok(list) => comments.set(list),
            Err(e) => log::warn!("failed to load comments for book {book_id}: {e}"),
        }
    });

    let rate_api = api.clone();
    let on_rate = Callback::new(move |rating: Option<u8>| {
        let Some(user) = current_session(session) else {
            return;
        };
        let Some(title) = book.with_untracked(|b| b.as_ref().map(|b| b.title.clone())) else {
            return;
        };
        let api = rate_api.clone();
        spawn(async move {
            match api.rate_book(book_id, rating).await {
                Ok(()) => {
                    books.update(|s| s.apply_rating(book_id, user.id, rating));
                    let (kind, message) = rating_message(&title, rating);
                    notify(toasts, kind, message);
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to rate the book!")),
            }
        });
    });

    let on_post = Callback::new(move |()| {
        let text = draft.get_untracked();
        if let Err(message) = validate_comment(&text) {
            notify_error(toasts, message);
            return;
        }
        let Some(user) = current_session(session) else {
            return;
        };
        draft.set(String::new());
        let api = api.clone();
        spawn(async move {
            match api.post_comment(book_id, &text).await {
                Ok(()) => {
                    comments.update(|list| {
                        list.push(Comment { id: user.id, comment: text, username: user.name });
                    });
                    notify_success(toasts, "Comment posted!");
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to post comment!")),
            }
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog book-details" on:click=move |ev| ev.stop_propagation()>
                {move || {
                    book.get()
                        .map(|b| {
                            view! {
                                <h2>{b.title}</h2>
                                <span class="book-details__category">{b.category.name}</span>
                                <p class="book-details__description">{b.description}</p>
                            }
                        })
                }}
                <div class="book-details__rating">
                    <span class="dialog__label">"Your rating"</span>
                    <StarRating value=my_rating on_change=on_rate/>
                </div>

                <h3>"Comments"</h3>
                <div class="book-details__comment-form">
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="Write a comment..."
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_post.run(());
                            }
                        }
                    />
                    <button class="btn btn--primary" on:click=move |_| on_post.run(())>
                        "Send"
                    </button>
                </div>
                <ul class="book-details__comments">
                    {move || {
                        comments
                            .with(|list| newest_first(list))
                            .into_iter()
                            .map(|c| view! { <CommentItem username=c.username comment=c.comment/> })
                            .collect::<Vec<_>>()
                    }}
                </ul>

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                </div>
            </div>
        </div>
    }
}
