//! HTTP route handlers.

pub mod compat;
pub mod health;
pub mod monitor;
pub mod replay;
