//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls behind the `Backend` trait, and `types`
//! defines the shared wire schema.

pub mod api;
pub mod types;
