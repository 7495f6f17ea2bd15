//! EazyBank accounts, cards and loans services.
//!
//! Three REST services sharing one binary. Each follows the same pattern:
//! create-or-reject on the owner's mobile number, fetch-or-404, update by
//! record number and delete by mobile number.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx, or in-memory stores when no database is configured
//! - **Format**: JSON requests/responses with camelCase fields
//!
//! # Layers
//!
//! - `handlers` parse and validate requests, then call `services`
//! - `services` hold the domain rules and talk to `repositories`
//! - `repositories` are traits with PostgreSQL and in-memory implementations

pub mod audit;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod numbers;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
