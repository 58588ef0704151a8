//! OAuth redirect handshake: parse the callback query, then install tokens.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider sends the browser back to `/auth/callback` with
//! either `error=<code>` or `access=<token>&refresh=<token>`. Parsing is a pure
//! function; [`CallbackHandler`] applies the result at most once per query.

#[cfg(test)]
#[path = "handshake_test.rs"]
mod handshake_test;

use crate::config::CHAT_PATH;
use crate::net::types::TokenPair;
use crate::state::tokens::{TokenStorage, TokenStore};

/// Why a callback could not complete sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandshakeFailure {
    /// The provider redirected with an `error` code.
    Provider(String),
    /// Neither an error nor a complete token pair was present.
    Malformed,
}

/// Parsed callback query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackParse {
    Success(TokenPair),
    Failure(HandshakeFailure),
}

/// Parse a callback query string (with or without the leading `?`).
///
/// Parameters present with an empty value count as absent.
#[must_use]
pub fn parse_callback(query: &str) -> CallbackParse {
    let mut error = None;
    let mut access = None;
    let mut refresh = None;
    for (key, value) in url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        let slot = match &*key {
            "error" => &mut error,
            "access" => &mut access,
            "refresh" => &mut refresh,
            _ => continue,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.into_owned());
        }
    }

    if let Some(code) = error {
        return CallbackParse::Failure(HandshakeFailure::Provider(code));
    }
    match (access, refresh) {
        (Some(access), Some(refresh)) => CallbackParse::Success(TokenPair { access, refresh }),
        _ => CallbackParse::Failure(HandshakeFailure::Malformed),
    }
}

/// Navigation requested after a successful handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    /// Replace the history entry so "back" cannot return to the callback URL.
    pub replace: bool,
}

/// What the callback view should do after processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackOutcome {
    Navigate(Redirect),
    Failed(HandshakeFailure),
}

/// Rendered state of the callback view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallbackStatus {
    #[default]
    Loading,
    Error,
}

impl From<&CallbackOutcome> for CallbackStatus {
    fn from(outcome: &CallbackOutcome) -> Self {
        match outcome {
            CallbackOutcome::Navigate(_) => Self::Loading,
            CallbackOutcome::Failed(_) => Self::Error,
        }
    }
}

/// Applies callback queries, skipping a query that already signed the user in.
#[derive(Debug, Default)]
pub struct CallbackHandler {
    processed: Option<String>,
}

impl CallbackHandler {
    /// Parse `query` and install tokens on success.
    ///
    /// Returns `None` when this exact query already installed tokens, so a
    /// re-render cannot install them or navigate a second time. A failed
    /// query reports its failure again.
    pub fn process<S: TokenStorage>(&mut self, query: &str, tokens: &TokenStore<S>) -> Option<CallbackOutcome> {
        if self.processed.as_deref() == Some(query) {
            return None;
        }

        match parse_callback(query) {
            CallbackParse::Success(pair) => {
                self.processed = Some(query.to_owned());
                tokens.set(pair);
                log::info!("sign-in handshake completed");
                Some(CallbackOutcome::Navigate(Redirect { path: CHAT_PATH, replace: true }))
            }
            CallbackParse::Failure(failure) => {
                log::warn!("sign-in handshake failed: {failure:?}");
                Some(CallbackOutcome::Failed(failure))
            }
        }
    }
}
