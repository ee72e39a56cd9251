//! # Domain Layer
//!
//! Conversation and audit models, the vendor-neutral generation request,
//! and the crate-wide error type. Independent of any transport.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
