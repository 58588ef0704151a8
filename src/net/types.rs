//! Shared wire-protocol DTOs for the client/backend boundary.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON exactly (`first_name`, `isUser`,
//! `used_knowledge_base`) so the structs can be handed straight to serde.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Access/refresh credential pair issued by the OAuth callback.
///
/// Both values are opaque bearer strings; nothing here parses or checks expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    #[cfg(test)]
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into() }
    }
}

// Credentials must never reach logs through `{:?}`.
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// The authenticated user as returned by `GET /auth/me/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
}

impl UserProfile {
    /// Name shown in the "Signed in as" label: first name, else username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() { &self.username } else { &self.first_name }
    }
}

/// One entry of the conversation log.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    /// Unique, increasing in send order.
    pub id: u64,
    pub text: String,
    #[serde(rename = "isUser")]
    pub is_user: bool,
    /// Milliseconds since the Unix epoch; serialized as RFC 3339.
    #[serde(serialize_with = "serialize_timestamp_ms")]
    pub timestamp: f64,
}

/// Body of `POST /chat/`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub chat_history: &'a [ChatMessage],
}

/// Outcome flag carried in every chat response body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeStatus {
    Success,
    Error,
}

/// Body returned by `POST /chat/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatExchangeResult {
    pub status: ExchangeStatus,
    #[serde(rename = "response")]
    pub response_text: String,
    /// Knowledge-base source names; the backend sends `null` when none apply.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub sources: Vec<String>,
    #[serde(default)]
    pub used_knowledge_base: bool,
    #[serde(default, rename = "error")]
    pub error_detail: Option<String>,
}

/// Body returned by `GET /auth/google/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginUrlResponse {
    pub auth_url: String,
}

/// Format epoch milliseconds as an RFC 3339 UTC string.
#[must_use]
pub fn format_timestamp_ms(ms: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let nanos = (ms * 1_000_000.0) as i128;
    time::OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .ok()
        .and_then(|at| at.format(&time::format_description::well_known::Rfc3339).ok())
        .unwrap_or_default()
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_timestamp_ms<S>(ms: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp_ms(*ms))
}

fn deserialize_nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
