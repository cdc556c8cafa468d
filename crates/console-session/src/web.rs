//! Browser-backed credential store (`web` feature).

use wasm_bindgen::JsCast;

use crate::{CookieJar, CredentialStore};

#[derive(Debug, Clone, Copy, Default)]
/// Reads cookies from the live `document.cookie`.
pub struct DocumentCookieStore;

impl CredentialStore for DocumentCookieStore {
    fn read(&self, name: &str) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let raw = html_document.cookie().ok()?;
        CookieJar::parse(&raw).read(name)
    }
}
