//! Cover-image upload: turn a picked file into a `data:` URL.
//!
//! The backend stores covers as the full data URL string, so the MIME type
//! travels with the bytes.

#[cfg(test)]
#[path = "cover_upload_test.rs"]
mod cover_upload_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Fallback MIME type when the browser reports none.
const DEFAULT_MIME: &str = "application/octet-stream";

/// Encode `bytes` as a base64 `data:` URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() { DEFAULT_MIME } else { mime.trim() };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// First file selected in the `<input type="file">` that fired `ev`.
#[cfg(feature = "csr")]
pub fn selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast as _;

    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Read `file` fully and encode it as a data URL.
///
/// # Errors
///
/// A description of the browser failure when the file cannot be read.
#[cfg(feature = "csr")]
pub async fn read_as_data_url(file: web_sys::File) -> Result<String, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("failed to read {}: {err:?}", file.name()))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    log::debug!("read cover image {} ({} bytes)", file.name(), bytes.len());
    Ok(to_data_url(&file.type_(), &bytes))
}
