//! Browser persistence for the app shell.

use crate::core::auth::{
    SessionStorage, cookie_assignment, cookie_expiry, cookie_removal, cookie_value,
};
use chrono::Utc;
use gloo::console;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

/// [`SessionStorage`] over `document.cookie`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DocumentCookies;

fn html_document() -> Option<HtmlDocument> {
    gloo::utils::document().dyn_into::<HtmlDocument>().ok()
}

fn assign(cookie: &str) {
    let Some(document) = html_document() else {
        console::error!("cookies unavailable: not an HTML document");
        return;
    };
    if let Err(err) = document.set_cookie(cookie) {
        console::error!("failed to write cookie", err);
    }
}

impl SessionStorage for DocumentCookies {
    fn read(&self, key: &str) -> Option<String> {
        let header = html_document()?.cookie().ok()?;
        cookie_value(&header, key)
    }

    fn write(&mut self, key: &str, value: &str, lifetime_days: u32) {
        let expires = cookie_expiry(Utc::now(), lifetime_days);
        assign(&cookie_assignment(key, value, expires));
    }

    fn remove(&mut self, key: &str) {
        assign(&cookie_removal(key));
    }
}
