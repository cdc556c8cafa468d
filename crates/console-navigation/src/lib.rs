//! Address-bar synchronized navigation state for the proxy console.

pub mod browser;
pub mod query;
pub mod router;
#[cfg(feature = "web")]
pub mod web;

pub use browser::{BrowserWindow, InMemoryBrowser};
pub use query::QueryParams;
pub use router::{
    NavigationKind, NavigationRouter, DEFAULT_PAGE, INVITATION_QUERY_PARAM, PAGE_QUERY_PARAM,
};
