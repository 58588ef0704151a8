//! Reusable UI components shared by pages.

pub mod chat_input;
pub mod protected_route;
