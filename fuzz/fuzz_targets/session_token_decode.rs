#![no_main]

use console_session::{
    decode_session_token, DecodeFailurePolicy, SessionContext, SessionContextBuilder,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);

    if let Ok(claims) = decode_session_token(&raw) {
        let mut context = SessionContext::default();
        context.apply_claims(&claims);
        assert_eq!(context.version, 1);
        if context.fetch_scope().is_some() {
            assert!(context.role.is_established());
        }
    }

    for policy in [
        DecodeFailurePolicy::RetainPrevious,
        DecodeFailurePolicy::ClearSession,
    ] {
        let mut context = SessionContext::default();
        let update = SessionContextBuilder::new(policy).apply_token(&mut context, Some(&raw));
        if !update.has_valid_token() {
            assert!(context.access_token.is_none());
            assert!(context.user_id.is_none());
        }
    }
});
