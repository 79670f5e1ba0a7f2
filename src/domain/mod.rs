//! Core domain types for the harmony scoring engine.

pub mod types;

pub use types::*;
