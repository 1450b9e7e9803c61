//! Serializable run configuration for the backtest command.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce a backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Root of the candle partition layout.
    pub data_dir: PathBuf,
    /// Symbols to backtest.
    pub symbols: Vec<String>,
    /// Horizon preset: "30m" or "2h".
    pub horizon: String,
    /// Output directory for summary and manifest JSON.
    pub out_dir: PathBuf,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            bail!("config must list at least one symbol");
        }
        self.horizon_bars()?;
        Ok(())
    }

    /// Map the horizon preset onto a future-window length in bars.
    pub fn horizon_bars(&self) -> Result<usize> {
        match self.horizon.as_str() {
            "30m" => Ok(6),
            "2h" => Ok(24),
            other => bail!("unknown horizon '{other}'. Valid: 30m, 2h"),
        }
    }

    /// Deterministic hash ID for this configuration: identical configs get
    /// identical run ids.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> RunConfig {
        RunConfig {
            data_dir: PathBuf::from("data"),
            symbols: vec!["GBPUSD".into()],
            horizon: "30m".into(),
            out_dir: PathBuf::from("results"),
        }
    }

    #[test]
    fn horizon_presets_map_to_bars() {
        let mut config = sample_config();
        assert_eq!(config.horizon_bars().unwrap(), 6);
        config.horizon = "2h".into();
        assert_eq!(config.horizon_bars().unwrap(), 24);
    }

    #[test]
    fn unknown_horizon_is_rejected() {
        let mut config = sample_config();
        config.horizon = "1d".into();
        assert!(config.horizon_bars().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_symbols_are_rejected() {
        let mut config = sample_config();
        config.symbols.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn run_id_is_stable_and_content_sensitive() {
        let config = sample_config();
        assert_eq!(config.run_id(), config.run_id());

        let mut other = sample_config();
        other.horizon = "2h".into();
        assert_ne!(config.run_id(), other.run_id());
    }

    #[test]
    fn toml_roundtrip() {
        let toml_str = r#"
data_dir = "data/market_candles"
symbols = ["GBPUSD", "EURUSD"]
horizon = "2h"
out_dir = "results"
"#;
        let config: RunConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.symbols.len(), 2);
        assert_eq!(config.horizon_bars().unwrap(), 24);
    }
}
