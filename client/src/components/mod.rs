//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the console chrome and the layout shell while reading
//! auth state from the Leptos context provided by `App`.

pub mod chrome;
pub mod layout;
