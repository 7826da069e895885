//! Save fetched bytes as a file through a temporary object URL.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// MIME type of downloaded resumes.
pub(crate) const PDF_MIME: &str = "application/pdf";

/// Trigger a browser download of `bytes` named `filename`.
///
/// The object URL and the synthetic anchor are released before returning.
pub(crate) fn save_bytes(bytes: &[u8], filename: &str, mime: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let props = BlobPropertyBag::new();
    props.set_type(mime);
    let blob = Blob::new_with_buffer_source_sequence_and_options(&parts, &props)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = gloo::utils::document()
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    let body = gloo::utils::body();
    body.append_child(&anchor)?;
    anchor.click();
    let removed = body.remove_child(&anchor).map(drop);
    Url::revoke_object_url(&url)?;
    removed
}
