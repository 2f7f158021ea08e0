//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the REST calls behind login, logout and the auth check.

pub mod api;
