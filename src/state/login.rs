//! Sign-in button state for the login view.
//!
//! ERROR HANDLING
//! ==============
//! A failed bootstrap call or a refused redirect never leaves the button
//! stuck: the action is restored and inline error text recorded for the view.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use crate::net::api::ApiError;

pub const LOGIN_FAILED_MESSAGE: &str = "Failed to connect to Google. Please try again.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    pub redirecting: bool,
    pub error: Option<String>,
}

impl LoginState {
    /// Whether the sign-in action is enabled.
    pub fn can_start(&self, auth_loading: bool) -> bool {
        !self.redirecting && !auth_loading
    }

    /// Mark the redirect as started. Returns `false` if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.redirecting {
            return false;
        }
        self.redirecting = true;
        self.error = None;
        true
    }

    /// Apply the bootstrap result, returning the provider URL to visit.
    pub fn settle(&mut self, result: Result<String, ApiError>) -> Option<String> {
        match result {
            Ok(url) => Some(url),
            Err(err) => {
                log::warn!("login bootstrap failed: {err}");
                self.fail();
                None
            }
        }
    }

    /// The browser refused to navigate to the provider URL.
    pub fn redirect_failed(&mut self) {
        log::warn!("browser refused the provider redirect");
        self.fail();
    }

    fn fail(&mut self) {
        self.redirecting = false;
        self.error = Some(LOGIN_FAILED_MESSAGE.to_owned());
    }
}
