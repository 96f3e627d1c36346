//! Category management dialog for administrators.
//!
//! DESIGN
//! ======
//! Renames and deletes cascade into the loaded books through `BooksState`,
//! so cards never show a category that no longer exists.

use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::state::books::BooksState;
use crate::state::toasts::{ToastState, notify_error, notify_success};
use crate::util::task::spawn;
use crate::util::validation::{validate_new_category, validate_rename};

#[component]
pub fn CategoriesModal(on_close: Callback<()>) -> impl IntoView {
    let books = expect_context::<RwSignal<BooksState>>();
    let api = expect_context::<ApiClient>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let new_name = RwSignal::new(String::new());
    // Category being renamed and its draft name.
    let editing = RwSignal::new(None::<i64>);
    let edit_name = RwSignal::new(String::new());

    let add_api = api.clone();
    let on_add = Callback::new(move |()| {
        let taken = |name: &str| books.with_untracked(|s| s.category_name_taken(name));
        let name = match validate_new_category(&new_name.get_untracked(), taken) {
            Ok(name) => name,
            Err(message) => {
                notify_error(toasts, message);
                return;
            }
        };
        let api = add_api.clone();
        spawn(async move {
            match api.add_category(&name).await {
                Ok(category) => {
                    books.update(|s| s.insert_category(category));
                    new_name.set(String::new());
                    notify_success(toasts, "Category added!");
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to add category!")),
            }
        });
    });

    let rename_api = api.clone();
    let on_rename = Callback::new(move |category_id: i64| {
        let name = match validate_rename(&edit_name.get_untracked()) {
            Ok(name) => name,
            Err(message) => {
                notify_error(toasts, message);
                return;
            }
        };
        let api = rename_api.clone();
        spawn(async move {
            match api.rename_category(category_id, &name).await {
                Ok(()) => {
                    books.update(|s| s.rename_category(category_id, &name));
                    editing.set(None);
                    notify_success(toasts, "Category renamed!");
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to rename category!")),
            }
        });
    });

    let on_delete = Callback::new(move |category_id: i64| {
        let api = api.clone();
        spawn(async move {
            match api.delete_category(category_id).await {
                Ok(()) => {
                    books.update(|s| s.remove_category(category_id));
                    notify_success(toasts, "Category deleted!");
                }
                Err(e) => notify_error(toasts, e.user_message("Failed to delete category!")),
            }
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog categories" on:click=move |ev| ev.stop_propagation()>
                <h2>"Edit Categories"</h2>
                <div class="categories__add">
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="New category name"
                        prop:value=move || new_name.get()
                        on:input=move |ev| new_name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_add.run(());
                            }
                        }
                    />
                    <button class="btn btn--primary" on:click=move |_| on_add.run(())>
                        "Add"
                    </button>
                </div>
                <ul class="categories__list">
                    {move || {
                        books
                            .with(|s| s.categories.clone())
                            .into_iter()
                            .map(|category| {
                                let id = category.id;
                                let name = category.name;
                                let start_name = name.clone();
                                view! {
                                    <li class="categories__item">
                                        <Show
                                            when=move || editing.get() == Some(id)
                                            fallback=move || view! { <span class="categories__name">{name.clone()}</span> }
                                        >
                                            <input
                                                class="dialog__input"
                                                type="text"
                                                prop:value=move || edit_name.get()
                                                on:input=move |ev| edit_name.set(event_target_value(&ev))
                                            />
                                            <button class="btn btn--primary" on:click=move |_| on_rename.run(id)>
                                                "Save"
                                            </button>
                                            <button class="btn" on:click=move |_| editing.set(None)>
                                                "Cancel"
                                            </button>
                                        </Show>
                                        <button
                                            class="btn categories__edit"
                                            title="Rename category"
                                            on:click=move |_| {
                                                edit_name.set(start_name.clone());
                                                editing.set(Some(id));
                                            }
                                        >
                                            "✎"
                                        </button>
                                        <button
                                            class="btn btn--danger categories__delete"
                                            title="Delete category"
                                            on:click=move |_| on_delete.run(id)
                                        >
                                            "✕"
                                        </button>
                                    </li>
                                }
                            })
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
