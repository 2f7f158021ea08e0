//! Domain services used by HTTP routes and the request gate.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential and directory logic so route handlers can
//! stay focused on protocol translation.

pub mod auth;
pub mod session;
