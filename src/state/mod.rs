//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`tokens`, `auth`, `conversation`, etc.) so each
//! controller is a plain struct with synchronous transitions; `session` ties
//! them to the backend and the async boundaries.

pub mod auth;
pub mod conversation;
pub mod handshake;
pub mod login;
pub mod session;
pub mod tokens;
