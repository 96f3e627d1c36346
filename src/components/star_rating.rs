//! Five-star rating input.
//!
//! Clicking the star that matches the current value clears the rating.

#[cfg(test)]
#[path = "star_rating_test.rs"]
mod star_rating_test;

use leptos::prelude::*;

pub const MAX_STARS: u8 = 5;

/// Rating that results from clicking star `clicked` when `current` is set.
/// `None` clears the rating.
pub fn next_rating(current: u8, clicked: u8) -> Option<u8> {
    if clicked == current { None } else { Some(clicked.min(MAX_STARS)) }
}

#[component]
pub fn StarRating(
    #[prop(into)] value: Signal<u8>,
    #[prop(optional)] on_change: Option<Callback<Option<u8>>>,
    #[prop(optional)] disabled: bool,
) -> impl IntoView {
    let interactive = on_change.is_some() && !disabled;

    view! {
        <span class="star-rating" class:star-rating--readonly=!interactive>
            {(1..=MAX_STARS)
                .map(|star| {
                    view! {
                        <button
                            class="star-rating__star"
                            class:star-rating__star--filled=move || star <= value.get()
                            type="button"
                            disabled=!interactive
                            aria-label=format!("{star} stars")
                            on:click=move |_| {
                                if let Some(on_change) = on_change {
                                    on_change.run(next_rating(value.get_untracked(), star));
                                }
                            }
                        >
                            "★"
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </span>
    }
}
