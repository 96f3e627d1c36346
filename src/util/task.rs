//! Fire-and-forget futures for event handlers.

use std::future::Future;

/// Run `fut` on the browser event loop.
///
/// Without `csr` there is no executor; the future is dropped unpolled.
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "csr"))]
    drop(fut);
}
