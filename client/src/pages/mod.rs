//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Access control lives in the layout shell, not here.

pub mod dashboard;
pub mod home;
pub mod login;
