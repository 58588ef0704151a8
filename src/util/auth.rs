//! Route-gate decisions shared by protected views and the login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.
//! No decision is made while auth is loading, so the login redirect never
//! flashes during token validation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::config::LOGIN_PATH;
use crate::state::auth::AuthState;

/// What a protected route renders for a given auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Validation in flight; show a placeholder and wait.
    Placeholder,
    Render,
    Redirect(&'static str),
}

#[must_use]
pub fn gate_decision(state: &AuthState) -> GateDecision {
    if state.loading {
        GateDecision::Placeholder
    } else if state.user.is_some() {
        GateDecision::Render
    } else {
        GateDecision::Redirect(LOGIN_PATH)
    }
}

/// Signed-in users visiting the login page go straight to the chat.
#[must_use]
pub fn should_skip_login(state: &AuthState) -> bool {
    gate_decision(state) == GateDecision::Render
}

/// Replace the current history entry with `/login` once auth settles signed-out.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GateDecision::Redirect(path) = auth.with(gate_decision) {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
