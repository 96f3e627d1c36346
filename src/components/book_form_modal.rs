//! Add/edit book dialog for administrators.

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::net::types::BookPayload;
use crate::state::books::BooksState;
use crate::state::toasts::{ToastState, notify_error, notify_success};
use crate::util::task::spawn;
use crate::util::validation::{BookForm, validate_book_form};

/// Which book the dialog writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookFormMode {
    Add,
    Edit(i64),
}

#[component]
pub fn BookFormModal(mode: BookFormMode, on_close: Callback<()>) -> impl IntoView {
    let books = expect_context::<RwSignal<BooksState>>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let initial = match mode {
        BookFormMode::Add => BookForm::default(),
        BookFormMode::Edit(id) => books
            .with_untracked(|s| s.find(id).map(BookForm::from_book))
            .unwrap_or_default(),
    };
    let title = RwSignal::new(initial.title);
    let description = RwSignal::new(initial.description);
    let isbn = RwSignal::new(initial.isbn);
    let pages = RwSignal::new(initial.pages);
    let category_id = RwSignal::new(initial.category_id);
    let image = RwSignal::new(initial.image);
    let busy = RwSignal::new(false);

    let on_file_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            let Some(file) = crate::util::cover_upload::selected_file(&ev) else {
                return;
            };
            spawn(async move {
                match crate::util::cover_upload::read_as_data_url(file).await {
                    Ok(data_url) => image.set(Some(data_url)),
                    Err(e) => log::warn!("{e}"),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, image);
        }
    };

    let submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        let form = BookForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            isbn: isbn.get_untracked(),
            pages: pages.get_untracked(),
            category_id: category_id.get_untracked(),
            image: image.get_untracked(),
        };
        let payload = match validate_book_form(&form) {
            Ok(payload) => payload,
            Err(message) => {
                notify_error(toasts, message);
                return;
            }
        };
        busy.set(true);
        let api = api.clone();
        spawn(async move {
            let saved = match mode {
                BookFormMode::Add => add_book(&api, books, toasts, &payload).await,
                BookFormMode::Edit(id) => edit_book(&api, books, toasts, id, &payload).await,
            };
            busy.set(false);
            if saved {
                on_close.run(());
            }
        });
    });

    let heading = match mode {
        BookFormMode::Add => "Add a New Book",
        BookFormMode::Edit(_) => "Edit Book",
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog book-form" on:click=move |ev| ev.stop_propagation()>
                <h2>{heading}</h2>
                <label class="dialog__label">
                    "Title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Description"
                    <textarea
                        class="dialog__input"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="dialog__label">
                    "ISBN"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || isbn.get()
                        on:input=move |ev| isbn.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Pages"
                    <input
                        class="dialog__input"
                        type="number"
                        min="1"
                        prop:value=move || pages.get()
                        on:input=move |ev| pages.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Category"
                    <select
                        class="dialog__input"
                        on:change=move |ev| category_id.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="" selected=move || category_id.get().is_none()>
                            "Select a category"
                        </option>
                        {move || {
                            books
                                .with(|s| s.categories.clone())
                                .into_iter()
                                .map(|c| {
                                    let id = c.id;
                                    view! {
                                        <option value=id.to_string() selected=move || category_id.get() == Some(id)>
                                            {c.name}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </label>
                <label class="dialog__label">
                    "Cover image"
                    <input class="dialog__input" type="file" accept="image/*" on:change=on_file_change/>
                </label>
                <Show when=move || image.with(Option::is_some)>
                    <img class="book-form__preview" src=move || image.get().unwrap_or_default() alt="Cover preview"/>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| submit.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Returns whether the book was saved.
async fn add_book(
    api: &ApiClient,
    books: RwSignal<BooksState>,
    toasts: RwSignal<ToastState>,
    payload: &BookPayload,
) -> bool {
    match api.add_book(payload).await {
        Ok(book) => {
            books.update(|s| s.insert_book(book));
            notify_success(toasts, "Book added!");
            true
        }
        Err(e) => {
            notify_error(toasts, e.user_message("Failed to add book!"));
            false
        }
    }
}

async fn edit_book(
    api: &ApiClient,
    books: RwSignal<BooksState>,
    toasts: RwSignal<ToastState>,
    book_id: i64,
    payload: &BookPayload,
) -> bool {
    match api.edit_book(book_id, payload).await {
        Ok(()) => {
            books.update(|s| s.apply_edit(book_id, payload));
            notify_success(toasts, "Book edited!");
            true
        }
        Err(e) => {
            notify_error(toasts, e.user_message("Failed to edit book!"));
            false
        }
    }
}
