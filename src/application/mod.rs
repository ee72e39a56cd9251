//! # Application Layer
//!
//! The three adapters (chat, screenshot commentary, site audit) and the
//! gateway interface they depend on.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
