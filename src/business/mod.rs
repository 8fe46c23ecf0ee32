//! Business logic layer for credvault
//!
//! This module provides the high-level Vault API: the store itself,
//! accounts and sessions, and the signed-in user's credentials.

pub mod vault;
pub mod auth;
pub mod credentials;
pub mod search;

pub use vault::Vault;
pub use auth::{AuthListener, ListenerId};
