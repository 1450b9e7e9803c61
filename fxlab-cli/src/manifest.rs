//! Run manifest export (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use fxlab_core::engine::WalkForwardSummary;

/// Sidecar written next to each symbol's summary, tying the output back to
/// the exact configuration and dataset that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub symbol: String,
    pub horizon_bars: usize,
    pub candle_count: usize,
    pub dataset_hash: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub duration_secs: f64,
    pub trades: u64,
    pub pnl: f64,
    pub winrate: f64,
}

impl RunManifest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        run_id: String,
        symbol: String,
        horizon_bars: usize,
        candle_count: usize,
        dataset_hash: String,
        duration_secs: f64,
        summary: &WalkForwardSummary,
    ) -> Self {
        Self {
            run_id,
            symbol,
            horizon_bars,
            candle_count,
            dataset_hash,
            timestamp: chrono::Utc::now(),
            duration_secs,
            trades: summary.trades,
            pnl: summary.pnl,
            winrate: summary.winrate,
        }
    }
}

pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    let json =
        serde_json::to_string_pretty(manifest).context("failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write manifest to {}", path.display()))?;
    Ok(())
}
