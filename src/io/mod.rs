//! File I/O: landmark ingest and analysis export.

pub mod export;
pub mod ingest;
