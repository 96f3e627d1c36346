//! Top-center notification stack.

use leptos::prelude::*;

use crate::state::toasts::ToastState;

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" role="status" aria-live="polite">
            <For
                each=move || toasts.with(|state| state.items().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("toast {}", toast.kind.css_modifier())
                            on:click=move |_| {
                                toasts.update(|state| {
                                    state.dismiss(id);
                                });
                            }
                        >
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
