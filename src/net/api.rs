//! REST API helpers for communicating with the backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the controllers in `state`
//! convert failures into recoverable UI states, so nothing here panics or
//! surfaces raw transport errors to components.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ChatExchangeResult, ChatRequest, UserProfile};
use crate::config::ApiConfig;
#[cfg(feature = "csr")]
use crate::config::{CHAT_ENDPOINT, CHAT_TIMEOUT_MS, CURRENT_USER_ENDPOINT, LOGIN_URL_ENDPOINT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed: {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("backend reported failure: {0}")]
    Rejected(String),
    #[error("request timed out")]
    Timeout,
    #[error("not available outside the browser")]
    Unavailable,
}

/// Backend operations the session and conversation controllers depend on.
///
/// `HttpBackend` is the browser implementation; tests supply fakes.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `GET /auth/google/login/`: identity-provider redirect target.
    async fn login_url(&self) -> Result<String, ApiError>;

    /// `GET /auth/me/` with the access token as bearer credential.
    async fn current_user(&self, access: &str) -> Result<UserProfile, ApiError>;

    /// `POST /chat/`, authenticated when an access token is available.
    async fn send_chat(
        &self,
        access: Option<&str>,
        request: &ChatRequest<'_>,
    ) -> Result<ChatExchangeResult, ApiError>;
}

/// `Authorization` header value for an access token.
#[must_use]
pub fn bearer(access: &str) -> String {
    format!("Bearer {access}")
}

/// `gloo-net` implementation of [`Backend`].
#[derive(Debug, Clone, Default)]
pub struct HttpBackend {
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    config: ApiConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "csr")]
fn network_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[cfg(feature = "csr")]
fn decode_error(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

impl Backend for HttpBackend {
    async fn login_url(&self) -> Result<String, ApiError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(LOGIN_URL_ENDPOINT);
            let resp = gloo_net::http::Request::get(&url)
                .send()
                .await
                .map_err(network_error)?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            let body: super::types::LoginUrlResponse = resp.json().await.map_err(decode_error)?;
            Ok(body.auth_url)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn current_user(&self, access: &str) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "csr")]
        {
            let url = self.config.endpoint(CURRENT_USER_ENDPOINT);
            let resp = gloo_net::http::Request::get(&url)
                .header("Authorization", &bearer(access))
                .send()
                .await
                .map_err(network_error)?;
            if !resp.ok() {
                return Err(ApiError::Status(resp.status()));
            }
            resp.json::<UserProfile>().await.map_err(decode_error)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = access;
            Err(ApiError::Unavailable)
        }
    }

    async fn send_chat(
        &self,
        access: Option<&str>,
        request: &ChatRequest<'_>,
    ) -> Result<ChatExchangeResult, ApiError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};

            let url = self.config.endpoint(CHAT_ENDPOINT);
            let exchange = async {
                let mut builder = gloo_net::http::Request::post(&url);
                if let Some(access) = access {
                    builder = builder.header("Authorization", &bearer(access));
                }
                let resp = builder
                    .json(request)
                    .map_err(|e| ApiError::Decode(e.to_string()))?
                    .send()
                    .await
                    .map_err(network_error)?;
                if !resp.ok() {
                    return Err(ApiError::Status(resp.status()));
                }
                resp.json::<ChatExchangeResult>().await.map_err(decode_error)
            };
            let timeout = gloo_timers::future::TimeoutFuture::new(CHAT_TIMEOUT_MS);
            futures::pin_mut!(exchange, timeout);
            match select(exchange, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (access, request);
            Err(ApiError::Unavailable)
        }
    }
}
