//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Model gateways (Gemini over HTTP, scripted offline double)
//! - Presentation surfaces (CLI controllers, JSON HTTP API)

pub mod adapter;
pub mod api;

pub use adapter::*;
