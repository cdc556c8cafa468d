#![no_main]

use console_navigation::{InMemoryBrowser, NavigationRouter, QueryParams};
use console_session::{CookieJar, CredentialStore};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);

    let jar = CookieJar::parse(&raw);
    if let Some(token) = jar.session_token() {
        assert!(!token.is_empty());
    }

    let params = QueryParams::parse(&raw);
    let reparsed = QueryParams::parse(&params.to_search());
    assert_eq!(reparsed, params);

    let mut router = NavigationRouter::new(InMemoryBrowser::new(raw.as_ref()));
    assert!(!router.current_page().is_empty());
    router.navigate(&raw);
    assert_eq!(router.current_page(), raw.as_ref());
    assert_eq!(router.sync_from_location(), if raw.is_empty() { "api-keys" } else { raw.as_ref() });
});
