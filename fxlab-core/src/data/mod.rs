//! Candle storage and generation.
//!
//! The engine itself never touches the filesystem — callers load a series
//! through this module and hand it in fully materialized.

pub mod partition;
pub mod synthetic;

use thiserror::Error;

use crate::domain::Candle;

pub use partition::{load_partition_dir, write_partition};
pub use synthetic::synthetic_candles;

/// Structured error types for candle storage operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no candle data for symbol '{symbol}' — run `synth` or ingest data first")]
    NoData { symbol: String },

    #[error("parquet I/O error: {0}")]
    Parquet(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Content hash of a candle series, for run manifests.
///
/// Hashes the serialized series so two identical datasets produce the same
/// hex digest regardless of where they were loaded from.
pub fn dataset_hash(candles: &[Candle]) -> Result<String, DataError> {
    let bytes = serde_json::to_vec(candles)
        .map_err(|e| DataError::Validation(format!("hash serialization: {e}")))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
