use super::*;
use crate::net::api::ApiError;
use crate::net::types::{ChatExchangeResult, ExchangeStatus, UserProfile};

fn profile(first: &str) -> UserProfile {
    UserProfile {
        email: "ada@example.com".to_owned(),
        first_name: first.to_owned(),
        last_name: String::new(),
        username: "ada".to_owned(),
    }
}

// =============================================================
// show_suggestions
// =============================================================

#[test]
fn suggestions_shown_for_fresh_conversation() {
    assert!(show_suggestions(&Conversation::new(0.0)));
}

#[test]
fn suggestions_hidden_once_user_has_spoken() {
    let mut chat = Conversation::new(0.0);
    let pending = chat.begin_turn("hello", 1.0).unwrap();
    assert!(!show_suggestions(&chat));

    let reply = ChatExchangeResult {
        status: ExchangeStatus::Success,
        response_text: "hi".to_owned(),
        sources: Vec::new(),
        used_knowledge_base: false,
        error_detail: None,
    };
    chat.finish_turn(&pending, Ok(reply), 2.0);
    assert!(!show_suggestions(&chat));
}

// =============================================================
// signed_in_label
// =============================================================

#[test]
fn signed_in_label_uses_display_name() {
    let auth = AuthState::signed_in(profile("Ada"));
    assert_eq!(signed_in_label(&auth).as_deref(), Some("Signed in as Ada"));
}

#[test]
fn signed_in_label_absent_when_signed_out() {
    assert_eq!(signed_in_label(&AuthState::signed_out()), None);
}

// =============================================================
// notice_seq
// =============================================================

#[test]
fn notice_seq_ignores_unrelated_log_updates() {
    let mut chat = Conversation::new(0.0);
    assert_eq!(notice_seq(&chat), None);

    let pending = chat.begin_turn("hello", 1.0).unwrap();
    chat.finish_turn(&pending, Err(ApiError::Timeout), 2.0);
    let shown = notice_seq(&chat);
    assert!(shown.is_some());

    let pending = chat.begin_turn("retry", 3.0).unwrap();
    assert_eq!(notice_seq(&chat), shown);
    chat.finish_turn(
        &pending,
        Ok(ChatExchangeResult {
            status: ExchangeStatus::Success,
            response_text: "here".to_owned(),
            sources: Vec::new(),
            used_knowledge_base: false,
            error_detail: None,
        }),
        4.0,
    );
    assert_eq!(notice_seq(&chat), shown);
}
