#![no_main]

use console_shell::{ConsolePage, PANEL_VOCABULARY};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let page = String::from_utf8_lossy(data);
    let panel = ConsolePage::dispatch(&page);
    let known = PANEL_VOCABULARY.iter().any(|(key, _)| *key == page.as_ref());
    if known {
        assert_eq!(panel.page_key(), page.as_ref());
    } else {
        assert_eq!(panel, ConsolePage::Usage);
    }
});
