//! Explicit session object shared by every view that needs auth or chat.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one [`AppSession`] at startup and provides it via context.
//! It owns the token store, the auth resolver, the callback guard and the
//! backend handle; the only way back to a clean state is [`Session::logout`],
//! which also runs the sign-out hooks that reset the conversation.
//!
//! DESIGN
//! ======
//! Auth validation is split into a synchronous `begin_auth` (so views can show
//! the loading state right away) and an async `complete_auth`. A completion
//! is applied only if the token it validated is still the current one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::api::{ApiError, Backend, HttpBackend};
use crate::net::types::ChatExchangeResult;
use crate::state::auth::{AuthResolver, AuthState, ProfileCheck, Resolution};
use crate::state::conversation::{ConversationCell, PendingExchange, TurnOutcome};
use crate::state::handshake::{CallbackHandler, CallbackOutcome};
use crate::state::tokens::{BrowserStorage, TokenStorage, TokenStore};

/// Session wired to `localStorage` and the HTTP backend.
pub type AppSession = Session<BrowserStorage, HttpBackend>;

type SignOutHook = Box<dyn Fn() + Send + Sync>;

pub struct Session<S, B> {
    tokens: TokenStore<S>,
    backend: B,
    resolver: Mutex<AuthResolver>,
    handshake: Mutex<CallbackHandler>,
    sign_out_hooks: Mutex<Vec<SignOutHook>>,
}

impl<S: TokenStorage, B: Backend> Session<S, B> {
    pub fn new(storage: S, backend: B) -> Self {
        Self {
            tokens: TokenStore::new(storage),
            backend,
            resolver: Mutex::new(AuthResolver::default()),
            handshake: Mutex::new(CallbackHandler::default()),
            sign_out_hooks: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the derived auth state.
    pub fn auth(&self) -> AuthState {
        self.resolver().state().clone()
    }

    /// Start validating the current access token.
    ///
    /// Settles immediately (and returns `None`) when no token is stored.
    pub fn begin_auth(&self) -> Option<ProfileCheck> {
        let access = self.tokens.access();
        self.resolver().begin(access.as_deref())
    }

    /// Fetch the profile for `check` and apply it.
    ///
    /// A rejected token is evicted from the store and counts as a sign-out.
    pub async fn complete_auth(&self, check: ProfileCheck) -> Resolution {
        let result = self.backend.current_user(check.access()).await;
        if self.tokens.access().as_deref() != Some(check.access()) {
            return Resolution::Stale;
        }
        let resolution = self.resolver().finish(&check, result);
        if resolution == Resolution::Rejected {
            self.sign_out();
        }
        resolution
    }

    /// Re-derive auth on every token change.
    ///
    /// `listener` runs synchronously inside `set`/`clear` with the new state
    /// (already `loading` when a token is present) and the check to complete.
    pub fn on_auth_change(self: &Arc<Self>, listener: impl Fn(AuthState, Option<ProfileCheck>) + Send + Sync + 'static)
    where
        S: Send + Sync + 'static,
        B: Send + Sync + 'static,
    {
        let session = Arc::downgrade(self);
        self.tokens.subscribe(move |_| {
            if let Some(session) = session.upgrade() {
                let check = session.begin_auth();
                listener(session.auth(), check);
            }
        });
    }

    /// Register a hook run whenever the user is signed out.
    pub fn on_sign_out(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.sign_out_hooks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(hook));
    }

    /// Apply an OAuth callback query, at most once per distinct query.
    pub fn complete_handshake(&self, query: &str) -> Option<CallbackOutcome> {
        self.handshake
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .process(query, &self.tokens)
    }

    /// Drop credentials and per-user state, settling signed-out.
    pub fn logout(&self) {
        self.sign_out();
        self.resolver().begin(None);
        log::info!("signed out");
    }

    /// Provider redirect target for starting sign-in.
    pub async fn login_url(&self) -> Result<String, ApiError> {
        self.backend.login_url().await
    }

    /// Drive a full turn against `conversation`.
    ///
    /// The user message is appended before the exchange starts; the reply
    /// is dropped if the conversation was reset in the meantime.
    pub async fn send_message(
        &self,
        conversation: &impl ConversationCell,
        text: &str,
        now: impl Fn() -> f64,
    ) -> TurnOutcome {
        let Some(pending) = conversation.update_with(|c| c.begin_turn(text, now())).flatten() else {
            return TurnOutcome::Refused;
        };
        let result = self.exchange(&pending).await;
        conversation
            .update_with(|c| c.finish_turn(&pending, result, now()))
            .unwrap_or(TurnOutcome::Discarded)
    }

    /// Authenticates with the token stored at call time, anonymous when none is.
    async fn exchange(&self, pending: &PendingExchange) -> Result<ChatExchangeResult, ApiError> {
        let access = self.tokens.access();
        self.backend.send_chat(access.as_deref(), &pending.request()).await
    }

    fn sign_out(&self) {
        self.tokens.clear();
        let hooks = self.sign_out_hooks.lock().unwrap_or_else(PoisonError::into_inner);
        for hook in hooks.iter() {
            hook();
        }
    }

    fn resolver(&self) -> MutexGuard<'_, AuthResolver> {
        self.resolver.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
