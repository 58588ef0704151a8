//! Conversation view: message log, suggestions and composer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The conversation lives in app context so it survives route changes; the
//! session resets it on sign-out. Sending goes through
//! `Session::send_message`, which appends the user message immediately and
//! settles the turn when the exchange resolves or times out.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::components::chat_input::ChatInput;
use crate::net::types::ChatMessage;
use crate::state::auth::AuthState;
use crate::state::conversation::{Conversation, SUGGESTIONS};
use crate::state::session::AppSession;
use crate::util::clock::{now_ms, time_label};
use crate::util::markdown::render_markdown_html;

/// How long an error notice stays on screen.
#[cfg(feature = "csr")]
const NOTICE_DISMISS_MS: u32 = 5_000;

/// Suggestions are offered until the user has said something.
fn show_suggestions(conversation: &Conversation) -> bool {
    !conversation.messages().iter().any(|m| m.is_user)
}

/// Identity of the visible notice; dismissal timers key off this alone.
fn notice_seq(conversation: &Conversation) -> Option<u64> {
    conversation.notice().map(|n| n.seq)
}

fn signed_in_label(auth: &AuthState) -> Option<String> {
    auth.user.as_ref().map(|u| format!("Signed in as {}", u.display_name()))
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<Arc<AppSession>>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<Conversation>>();

    let send_session = Arc::clone(&session);
    let on_send = Callback::new(move |text: String| {
        #[cfg(feature = "csr")]
        {
            let session = Arc::clone(&send_session);
            leptos::task::spawn_local(async move {
                let outcome = session.send_message(&chat, &text, now_ms).await;
                log::debug!("chat turn outcome: {outcome:?}");
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&send_session, text);
        }
    });

    let current_notice = Memo::new(move |_| chat.with(notice_seq));

    #[cfg(feature = "csr")]
    Effect::new(move || {
        if let Some(seq) = current_notice.get() {
            gloo_timers::callback::Timeout::new(NOTICE_DISMISS_MS, move || chat.update(|c| c.dismiss_notice(seq)))
                .forget();
        }
    });
    #[cfg(not(feature = "csr"))]
    let _ = current_notice;

    let on_logout = move |_| session.logout();

    let awaiting = Signal::derive(move || chat.with(Conversation::is_awaiting));

    view! {
        <div class="chat-page">
            <header class="chat-header">
                <div class="chat-header__title">
                    <span class="chat-header__avatar">"🤖"</span>
                    <div>
                        <h1>"DigiBuddy"</h1>
                        <span class="chat-header__user">{move || auth.with(signed_in_label)}</span>
                    </div>
                </div>
                <button class="chat-header__logout" on:click=on_logout>
                    "Logout"
                </button>
            </header>

            {move || {
                chat.with(|c| c.notice().cloned())
                    .map(|notice| {
                        let seq = notice.seq;
                        view! {
                            <div class="chat-notice" role="alert">
                                <strong>{notice.title}</strong>
                                <span>{notice.description}</span>
                                <button
                                    class="chat-notice__dismiss"
                                    on:click=move |_| chat.update(|c| c.dismiss_notice(seq))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
            }}

            <div class="chat-messages">
                {move || chat.with(|c| c.messages().iter().map(message_view).collect::<Vec<_>>())}
                {move || {
                    awaiting
                        .get()
                        .then(|| {
                            view! {
                                <div class="chat-message chat-message--assistant chat-message--typing">
                                    <span class="typing-dot"></span>
                                    <span class="typing-dot"></span>
                                    <span class="typing-dot"></span>
                                </div>
                            }
                        })
                }}
            </div>

            <Show when=move || chat.with(show_suggestions)>
                <div class="chat-suggestions">
                    {SUGGESTIONS
                        .iter()
                        .map(|suggestion| {
                            let text = (*suggestion).to_owned();
                            view! {
                                <button
                                    class="chat-suggestions__item"
                                    disabled=move || awaiting.get()
                                    on:click=move |_| on_send.run(text.clone())
                                >
                                    {*suggestion}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </Show>

            <ChatInput on_send=on_send disabled=awaiting />
        </div>
    }
}

fn message_view(msg: &ChatMessage) -> impl IntoView + use<> {
    let is_user = msg.is_user;
    let stamp = time_label(msg.timestamp);
    let body = if is_user {
        view! { <span>{msg.text.clone()}</span> }.into_any()
    } else {
        let rendered = render_markdown_html(&msg.text);
        view! { <div class="chat-message__markdown" inner_html=rendered></div> }.into_any()
    };

    view! {
        <div class="chat-message" class:chat-message--user=is_user class:chat-message--assistant=!is_user>
            <div class="chat-message__content">{body}</div>
            <span class="chat-message__time">{stamp}</span>
        </div>
    }
}
