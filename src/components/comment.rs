//! Single comment row in the book details modal.

use leptos::prelude::*;

#[component]
pub fn CommentItem(username: String, comment: String) -> impl IntoView {
    view! {
        <li class="comment">
            <span class="comment__author">{username}</span>
            <p class="comment__body">{comment}</p>
        </li>
    }
}
