//! HTTP middleware components.
//!
//! Middleware are functions that run around route handlers.

/// Error response path enrichment
pub mod api_path;
