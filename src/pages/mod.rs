//! Routed page components.

pub mod auth_callback;
pub mod chat;
pub mod login;
