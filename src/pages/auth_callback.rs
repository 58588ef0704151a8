//! OAuth callback page: completes sign-in from the redirect query.
//!
//! The once-per-query guard lives in the session, so remounting the page on
//! the same URL neither reinstalls tokens nor navigates again.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::config::LOGIN_PATH;
use crate::state::handshake::{CallbackOutcome, CallbackStatus};
use crate::state::session::AppSession;

#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let location = use_location();
    let navigate = use_navigate();
    let status = RwSignal::new(CallbackStatus::Loading);

    Effect::new(move || {
        let query = location.search.get();
        match session.complete_handshake(&query) {
            Some(CallbackOutcome::Navigate(redirect)) => {
                navigate(redirect.path, NavigateOptions { replace: redirect.replace, ..NavigateOptions::default() });
            }
            Some(outcome @ CallbackOutcome::Failed(_)) => status.set(CallbackStatus::from(&outcome)),
            None => {}
        }
    });

    view! {
        <div class="callback-page">
            <div class="callback-card">
                {move || match status.get() {
                    CallbackStatus::Loading => view! {
                        <div class="route-gate__spinner"></div>
                        <h2>"Signing you in…"</h2>
                        <p>"We’re completing the secure sign-in and redirecting you back to your chat."</p>
                    }
                    .into_any(),
                    CallbackStatus::Error => view! {
                        <h2>"Login failed"</h2>
                        <p>"We couldn’t complete the Google sign-in. Please go back and try again."</p>
                        <a class="login-button" href=LOGIN_PATH>
                            "Return to login"
                        </a>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
