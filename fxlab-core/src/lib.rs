//! FxLab Core — walk-forward backtest engine for FX candle series.
//!
//! This crate contains the heart of the toolkit:
//! - Domain types (candles, month keys)
//! - Stateless indicator functions (ATR, RSI) with NaN warm-up semantics
//! - UTC session classifier with a per-session transaction-cost table
//! - Deterministic intrabar bracket simulator
//! - Month-partitioned walk-forward driver
//! - Parquet partition storage and a seeded synthetic candle generator
//!
//! The engine is purely synchronous and stateless across invocations: a
//! candle series goes in, a summary value comes out, and independent calls
//! are safe to run concurrently.

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod sessions;
