//! Login page with the Google sign-in button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetches the provider redirect target from the backend and sends the
//! browser there. A failed call or refused redirect shows inline and
//! re-enables the button.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::config::CHAT_PATH;
use crate::state::auth::AuthState;
use crate::state::login::LoginState;
use crate::state::session::AppSession;
use crate::util::auth::should_skip_login;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let login = RwSignal::new(LoginState::default());
    let navigate = use_navigate();

    Effect::new(move || {
        if auth.with(should_skip_login) {
            navigate(CHAT_PATH, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_sign_in = move |_| {
        if !login.with(|l| l.can_start(auth.with(|a| a.loading))) {
            return;
        }
        if !login.try_update(LoginState::begin).unwrap_or(false) {
            return;
        }

        #[cfg(feature = "csr")]
        {
            let session = Arc::clone(&session);
            leptos::task::spawn_local(async move {
                let result = session.login_url().await;
                if let Some(url) = login.try_update(|l| l.settle(result)).flatten() {
                    let redirected = web_sys::window().is_some_and(|w| w.location().set_href(&url).is_ok());
                    if !redirected {
                        login.update(LoginState::redirect_failed);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &session;
        }
    };

    let disabled = move || !login.with(|l| l.can_start(auth.with(|a| a.loading)));

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-card__avatar">"🤖"</div>
                <h1>"Welcome to DigiBuddy"</h1>
                <p class="login-card__subtitle">
                    "Sign in with Google to continue to your mental health companion."
                </p>
                <button class="login-button" on:click=on_sign_in disabled=disabled>
                    {move || {
                        if login.with(|l| l.redirecting) {
                            "Redirecting to Google..."
                        } else {
                            "Continue with Google"
                        }
                    }}
                </button>
                <Show when=move || login.with(|l| l.error.is_some())>
                    <p class="login-message login-message--error">
                        {move || login.with(|l| l.error.clone().unwrap_or_default())}
                    </p>
                </Show>
            </div>
        </div>
    }
}
