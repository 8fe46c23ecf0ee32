//! Utility functions

pub mod id_gen;
pub mod common;

pub use id_gen::*;
pub use common::*;
