//! `face-harmony` library crate.
//!
//! The binary (`harmony`) is a thin wrapper around this library so that:
//!
//! - the scoring engine is testable without spawning processes
//! - modules are reusable (e.g., future service/WASM front-ends)
//! - code stays easy to navigate as the project grows
//!
//! The engine itself (`domain`, `registry`, `measure`, `math`, `scoring`,
//! `analysis`, `adapter`) is a pure, synchronous computation over immutable
//! inputs; file ingest/export and terminal output live behind the binary.

pub mod adapter;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod landmarks;
pub mod math;
pub mod measure;
pub mod plot;
pub mod registry;
pub mod report;
pub mod scoring;
