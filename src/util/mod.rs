//! Shared client utility modules.
//!
//! DESIGN
//! ======
//! Utilities are grouped by concern (route gating, time, markdown) to keep
//! page components focused on wiring state to views.

pub mod auth;
pub mod clock;
pub mod markdown;
