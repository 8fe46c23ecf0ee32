//! Database layer for credvault
//!
//! Handles SQLite database operations including:
//! - Schema creation and version checks
//! - Account rows (salt, key rounds, sealed verifier)
//! - Per-user credential documents with sealed secrets

pub mod models;
pub mod schema;
pub mod connection;
pub mod queries;

pub use connection::Database;
pub use models::*;
