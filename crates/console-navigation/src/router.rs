//! Binding between the in-memory current page and the `page` query parameter.
//!
//! Every mutation writes the address bar and the in-memory value in the same
//! call, so reading either side after a navigation yields the same page.

use crate::{BrowserWindow, QueryParams};

pub const PAGE_QUERY_PARAM: &str = "page";
pub const INVITATION_QUERY_PARAM: &str = "invitation_id";
pub const DEFAULT_PAGE: &str = "api-keys";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How the router writes a page change into session history.
pub enum NavigationKind {
    Push,
    Replace,
}

impl NavigationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Replace => "replace",
        }
    }
}

#[derive(Debug)]
/// Public struct `NavigationRouter` owning the browser window handle and the active page.
pub struct NavigationRouter<B> {
    browser: B,
    current_page: String,
}

impl<B: BrowserWindow> NavigationRouter<B> {
    /// Reads the initial page from the address bar, defaulting to `api-keys`.
    pub fn new(browser: B) -> Self {
        let current_page = page_from_search(&browser.location_search());
        Self {
            browser,
            current_page,
        }
    }

    pub fn current_page(&self) -> &str {
        self.current_page.as_str()
    }

    /// Value of `invitation_id` in the current location.
    pub fn invitation_id(&self) -> Option<String> {
        QueryParams::parse(&self.browser.location_search())
            .get(INVITATION_QUERY_PARAM)
            .map(str::to_string)
    }

    pub fn query_params(&self) -> QueryParams {
        QueryParams::parse(&self.browser.location_search())
    }

    /// Pushes a new history entry with `page` set, preserving every other parameter.
    pub fn navigate(&mut self, page: &str) {
        self.write_page(page, NavigationKind::Push);
    }

    /// Rewrites the current history entry with `page`.
    pub fn force_page(&mut self, page: &str) {
        self.write_page(page, NavigationKind::Replace);
    }

    /// Re-derives the page after the browser moved through history on its own.
    pub fn sync_from_location(&mut self) -> &str {
        self.current_page = page_from_search(&self.browser.location_search());
        tracing::debug!(
            page = self.current_page.as_str(),
            "navigation synchronized after history pop"
        );
        self.current_page.as_str()
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut B {
        &mut self.browser
    }

    pub fn into_browser(self) -> B {
        self.browser
    }

    fn write_page(&mut self, page: &str, kind: NavigationKind) {
        let mut params = QueryParams::parse(&self.browser.location_search());
        params.set(PAGE_QUERY_PARAM, page);
        let search = params.to_search();
        match kind {
            NavigationKind::Push => self.browser.push_state(&search),
            NavigationKind::Replace => self.browser.replace_state(&search),
        }
        self.current_page = page.to_string();
        tracing::debug!(page, kind = kind.as_str(), "navigation updated");
    }
}

fn page_from_search(search: &str) -> String {
    QueryParams::parse(search)
        .get(PAGE_QUERY_PARAM)
        .filter(|page| !page.is_empty())
        .unwrap_or(DEFAULT_PAGE)
        .to_string()
}
