//! `web-sys` implementation of [`BrowserWindow`] (`web` feature).

use wasm_bindgen::JsValue;

use crate::BrowserWindow;

#[derive(Debug, Clone, Copy, Default)]
/// The live browser tab.
pub struct WebSysBrowser;

impl BrowserWindow for WebSysBrowser {
    fn location_search(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().search().ok())
            .unwrap_or_default()
    }

    fn push_state(&mut self, search: &str) {
        let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
            return;
        };
        if let Err(error) = history.push_state_with_url(&JsValue::NULL, "", Some(search)) {
            tracing::warn!(?error, "history.pushState failed");
        }
    }

    fn replace_state(&mut self, search: &str) {
        let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
            return;
        };
        if let Err(error) = history.replace_state_with_url(&JsValue::NULL, "", Some(search)) {
            tracing::warn!(?error, "history.replaceState failed");
        }
    }

    fn assign_location(&mut self, href: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(error) = window.location().set_href(href) {
            tracing::warn!(?error, "location assignment failed");
        }
    }
}
