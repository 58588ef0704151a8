//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The resolver turns the raw access token
//! into an [`AuthState`] by validating it against `/auth/me/`.
//!
//! DESIGN
//! ======
//! Every validation is issued as a [`ProfileCheck`] tagged with a generation
//! number. Only the check from the latest `begin` may settle the state, so a
//! slow response for a replaced token can never overwrite a newer result.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::api::ApiError;
use crate::net::types::UserProfile;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl AuthState {
    /// State before the first validation has been started.
    #[must_use]
    pub fn pending() -> Self {
        Self { user: None, loading: true }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    #[must_use]
    pub fn signed_in(user: UserProfile) -> Self {
        Self { user: Some(user), loading: false }
    }
}

/// One in-flight profile validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCheck {
    generation: u64,
    access: String,
}

impl ProfileCheck {
    /// The access token this check validates.
    pub fn access(&self) -> &str {
        &self.access
    }
}

/// How a finished [`ProfileCheck`] affected the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Authenticated,
    /// The token failed validation; the caller evicts it.
    Rejected,
    /// A newer token superseded this check; the result was dropped.
    Stale,
}

/// Derives [`AuthState`] from successive access-token values.
#[derive(Debug)]
pub struct AuthResolver {
    state: AuthState,
    generation: u64,
}

impl Default for AuthResolver {
    fn default() -> Self {
        Self { state: AuthState::pending(), generation: 0 }
    }
}

impl AuthResolver {
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// React to a new access-token value.
    ///
    /// Without a token the state settles immediately and no check is issued.
    pub fn begin(&mut self, access: Option<&str>) -> Option<ProfileCheck> {
        self.generation += 1;
        match access {
            None => {
                self.state = AuthState::signed_out();
                None
            }
            Some(access) => {
                self.state = AuthState::pending();
                Some(ProfileCheck { generation: self.generation, access: access.to_owned() })
            }
        }
    }

    /// Apply the profile response for `check`, unless a later `begin` superseded it.
    pub fn finish(&mut self, check: &ProfileCheck, result: Result<UserProfile, ApiError>) -> Resolution {
        if check.generation != self.generation {
            return Resolution::Stale;
        }
        match result {
            Ok(user) => {
                self.state = AuthState::signed_in(user);
                Resolution::Authenticated
            }
            Err(err) => {
                log::warn!("access token rejected during profile check: {err}");
                self.state = AuthState::signed_out();
                Resolution::Rejected
            }
        }
    }
}
