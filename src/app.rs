//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::config::{ApiConfig, CHAT_PATH};
use crate::net::api::HttpBackend;
use crate::pages::{auth_callback::AuthCallbackPage, chat::ChatPage, login::LoginPage};
use crate::state::auth::{AuthState, ProfileCheck};
use crate::state::conversation::Conversation;
use crate::state::session::AppSession;
use crate::state::tokens::BrowserStorage;
use crate::util::clock::now_ms;

/// Publish `state` and, when a check was issued, finish it in the background.
fn apply_auth(session: &Arc<AppSession>, auth: RwSignal<AuthState>, state: AuthState, check: Option<ProfileCheck>) {
    auth.set(state);

    #[cfg(feature = "csr")]
    {
        if let Some(check) = check {
            let session = Arc::clone(session);
            leptos::task::spawn_local(async move {
                let resolution = session.complete_auth(check).await;
                log::debug!("profile check settled: {resolution:?}");
                auth.set(session.auth());
            });
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (session, check);
    }
}

/// Root application component.
///
/// Owns the session and the conversation for the lifetime of the page. Auth
/// is re-derived synchronously on every token change, and signing out resets
/// the conversation.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = Arc::new(AppSession::new(BrowserStorage, HttpBackend::new(ApiConfig::from_build_env())));
    let auth = RwSignal::new(session.auth());
    let chat = RwSignal::new(Conversation::new(now_ms()));

    let listener_session = Arc::downgrade(&session);
    session.on_auth_change(move |state, check| {
        if let Some(session) = listener_session.upgrade() {
            apply_auth(&session, auth, state, check);
        }
    });
    session.on_sign_out(move || {
        chat.try_update(|c| c.reset(now_ms()));
    });

    let check = session.begin_auth();
    apply_auth(&session, auth, session.auth(), check);

    provide_context(session);
    provide_context(auth);
    provide_context(chat);

    view! {
        <Stylesheet id="leptos" href="/pkg/digibuddy.css"/>
        <Title text="DigiBuddy"/>

        <Router>
            <Routes fallback=|| view! { <Redirect path=CHAT_PATH/> }>
                <Route path=StaticSegment("") view=|| view! { <Redirect path=CHAT_PATH/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("callback")) view=AuthCallbackPage/>
                <Route
                    path=StaticSegment("chat")
                    view=|| view! { <ProtectedRoute><ChatPage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
