//! # Miasma IO
//!
//! Persistence for the field layer.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The saved layout of fields: stable type keys, per-submap records
//! - JSON save files, optionally gzip-compressed

/// Error types and result aliases for I/O operations
pub mod error;
/// Saved layout of the field layer and how it is captured and restored
pub mod persistence;
/// Reading and writing save files
pub mod storage;

pub use error::{IoError, Result};
pub use persistence::{CellRecord, FieldRecord, LayerSnapshot, LoadReport, SubmapRecord};
pub use storage::{from_json, load_snapshot, save_snapshot, to_json};
