use super::*;
use crate::net::types::UserProfile;

fn user() -> UserProfile {
    UserProfile {
        email: "ann@example.com".to_owned(),
        first_name: "Ann".to_owned(),
        last_name: "Lee".to_owned(),
        username: "ann".to_owned(),
    }
}

#[test]
fn gate_waits_while_loading_even_without_user() {
    let state = AuthState { user: None, loading: true };
    assert_eq!(gate_decision(&state), GateDecision::Placeholder);
}

#[test]
fn gate_waits_while_loading_with_stale_user() {
    let state = AuthState { user: Some(user()), loading: true };
    assert_eq!(gate_decision(&state), GateDecision::Placeholder);
}

#[test]
fn gate_renders_when_user_present() {
    let state = AuthState { user: Some(user()), loading: false };
    assert_eq!(gate_decision(&state), GateDecision::Render);
    assert!(should_skip_login(&state));
}

#[test]
fn gate_redirects_to_login_when_settled_without_user() {
    let state = AuthState { user: None, loading: false };
    assert_eq!(gate_decision(&state), GateDecision::Redirect("/login"));
    assert!(!should_skip_login(&state));
}
