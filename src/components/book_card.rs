//! Catalogue card for one book on the home grid.

use leptos::prelude::*;

use crate::components::star_rating::StarRating;
use crate::net::types::Book;
use crate::state::books::{average_rating, cover_src, has_favorited};

/// Card with cover, summary, rating, and per-book actions.
///
/// Edit and delete controls are only rendered when `admin` is set.
#[component]
pub fn BookCard(
    book: Book,
    user_id: i64,
    #[prop(optional)] admin: bool,
    on_view: Callback<i64>,
    on_favorite: Callback<i64>,
    #[prop(optional)] on_edit: Option<Callback<i64>>,
    #[prop(optional)] on_delete: Option<Callback<i64>>,
) -> impl IntoView {
    let id = book.id;
    let favorited = has_favorited(&book, user_id);
    let average = average_rating(&book.book_ratings);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded = average.round() as u8;
    let rating_count = book.book_ratings.len();
    let cover = cover_src(&book);

    view! {
        <article class="book-card">
            <img class="book-card__cover" src=cover alt=book.title.clone()/>
            <div class="book-card__body">
                <h3 class="book-card__title">{book.title.clone()}</h3>
                <span class="book-card__category">{book.category.name.clone()}</span>
                <div class="book-card__rating">
                    <StarRating value=Signal::derive(move || rounded)/>
                    <span class="book-card__rating-meta">{format!("{average:.1} ({rating_count})")}</span>
                </div>
                <p class="book-card__description">{book.description.clone()}</p>
            </div>
            <div class="book-card__actions">
                <button
                    class="btn book-card__favorite"
                    class:book-card__favorite--active=favorited
                    title=if favorited { "Remove from favorites" } else { "Add to favorites" }
                    on:click=move |_| on_favorite.run(id)
                >
                    {if favorited { "♥" } else { "♡" }}
                </button>
                <button class="btn btn--primary" on:click=move |_| on_view.run(id)>
                    "View"
                </button>
                <Show when=move || admin>
                    <button
                        class="btn book-card__edit"
                        on:click=move |_| {
                            if let Some(on_edit) = on_edit {
                                on_edit.run(id);
                            }
                        }
                    >
                        "Edit"
                    </button>
                    <button
                        class="btn btn--danger book-card__delete"
                        on:click=move |_| {
                            if let Some(on_delete) = on_delete {
                                on_delete.run(id);
                            }
                        }
                    >
                        "Delete"
                    </button>
                </Show>
            </div>
        </article>
    }
}
