use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::state::tokens::MemoryStorage;

/// Counts token installs (not clears) on `tokens`.
fn install_counter(tokens: &TokenStore<MemoryStorage>) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    tokens.subscribe(move |pair| {
        if pair.is_some() {
            sink.fetch_add(1, Ordering::SeqCst);
        }
    });
    count
}

// =============================================================
// parse_callback
// =============================================================

#[test]
fn parse_callback_accepts_access_and_refresh() {
    assert_eq!(
        parse_callback("?access=abc&refresh=def"),
        CallbackParse::Success(TokenPair::new("abc", "def"))
    );
}

#[test]
fn parse_callback_decodes_percent_encoding() {
    assert_eq!(
        parse_callback("access=a%2Eb%2Ec&refresh=r%3D%3D"),
        CallbackParse::Success(TokenPair::new("a.b.c", "r=="))
    );
}

#[test]
fn parse_callback_error_wins_over_tokens() {
    assert_eq!(
        parse_callback("?error=state_expired&access=abc&refresh=def"),
        CallbackParse::Failure(HandshakeFailure::Provider("state_expired".to_owned()))
    );
}

#[test]
fn parse_callback_missing_refresh_is_malformed() {
    assert_eq!(parse_callback("?access=abc"), CallbackParse::Failure(HandshakeFailure::Malformed));
    assert_eq!(parse_callback(""), CallbackParse::Failure(HandshakeFailure::Malformed));
}

#[test]
fn parse_callback_treats_empty_values_as_absent() {
    assert_eq!(
        parse_callback("?error=&access=abc&refresh=def"),
        CallbackParse::Success(TokenPair::new("abc", "def"))
    );
    assert_eq!(
        parse_callback("?access=&refresh=def"),
        CallbackParse::Failure(HandshakeFailure::Malformed)
    );
}

#[test]
fn parse_callback_uses_first_occurrence() {
    assert_eq!(
        parse_callback("?access=one&access=two&refresh=r"),
        CallbackParse::Success(TokenPair::new("one", "r"))
    );
}

// =============================================================
// CallbackHandler
// =============================================================

#[test]
fn process_installs_tokens_and_navigates_to_chat_replacing_history() {
    let tokens = TokenStore::new(MemoryStorage::default());
    let mut handler = CallbackHandler::default();

    let outcome = handler.process("?access=abc&refresh=def", &tokens).unwrap();

    assert_eq!(outcome, CallbackOutcome::Navigate(Redirect { path: "/chat", replace: true }));
    assert_eq!(tokens.get(), Some(TokenPair::new("abc", "def")));
}

#[test]
fn process_same_query_twice_installs_once() {
    let tokens = TokenStore::new(MemoryStorage::default());
    let installs = install_counter(&tokens);
    let mut handler = CallbackHandler::default();

    assert!(handler.process("?access=abc&refresh=def", &tokens).is_some());
    assert!(handler.process("?access=abc&refresh=def", &tokens).is_none());
    assert_eq!(installs.load(Ordering::SeqCst), 1);
}

#[test]
fn process_error_installs_nothing() {
    let tokens = TokenStore::new(MemoryStorage::default());
    let installs = install_counter(&tokens);
    let mut handler = CallbackHandler::default();

    let outcome = handler.process("?error=google_auth_failed", &tokens).unwrap();

    assert_eq!(CallbackStatus::from(&outcome), CallbackStatus::Error);
    assert!(tokens.get().is_none());
    assert_eq!(installs.load(Ordering::SeqCst), 0);
}

#[test]
fn repeated_failed_query_reports_failure_again() {
    let tokens = TokenStore::new(MemoryStorage::default());
    let mut handler = CallbackHandler::default();

    let first = handler.process("?error=access_denied", &tokens);
    let again = handler.process("?error=access_denied", &tokens);

    assert_eq!(first, again);
    assert!(matches!(again, Some(CallbackOutcome::Failed(_))));
    assert!(tokens.get().is_none());
}

#[test]
fn callback_status_defaults_to_loading() {
    assert_eq!(CallbackStatus::default(), CallbackStatus::Loading);
}
