//! Parquet partition layout for candle series.
//!
//! Layout: `{data_dir}/symbol={SYMBOL}/{year}.parquet` with columns
//! `ts` (UTC epoch milliseconds, i64), `o h l c` (f64), `v` (u64).
//!
//! Writes are atomic: write to `.tmp`, rename into place. Loads validate
//! schema and non-emptiness per file, then concatenate and sort by `ts`.

use chrono::{DateTime, Datelike, Utc};
use polars::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::DataError;
use crate::domain::Candle;

fn symbol_dir(data_dir: &Path, symbol: &str) -> PathBuf {
    data_dir.join(format!("symbol={symbol}"))
}

/// Write a candle series into the partition layout, one file per year.
pub fn write_partition(data_dir: &Path, symbol: &str, candles: &[Candle]) -> Result<(), DataError> {
    if candles.is_empty() {
        return Err(DataError::Validation("no candles to write".into()));
    }

    let sym_dir = symbol_dir(data_dir, symbol);
    fs::create_dir_all(&sym_dir).map_err(|e| DataError::Io(format!("create dir: {e}")))?;

    let mut by_year: HashMap<i32, Vec<&Candle>> = HashMap::new();
    for candle in candles {
        by_year.entry(candle.ts.year()).or_default().push(candle);
    }

    for (year, year_candles) in &by_year {
        let df = candles_to_dataframe(year_candles)?;
        let path = sym_dir.join(format!("{year}.parquet"));
        let tmp_path = path.with_extension("parquet.tmp");

        write_parquet(&df, &tmp_path)?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::Io(format!("atomic rename failed: {e}"))
        })?;
    }

    Ok(())
}

/// Load every parquet file under a symbol's partition dir, sorted by `ts`.
pub fn load_partition_dir(data_dir: &Path, symbol: &str) -> Result<Vec<Candle>, DataError> {
    let sym_dir = symbol_dir(data_dir, symbol);
    if !sym_dir.exists() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
        });
    }

    let entries = fs::read_dir(&sym_dir).map_err(|e| DataError::Io(format!("read dir: {e}")))?;

    let mut all_candles = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DataError::Io(format!("dir entry: {e}")))?;
        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("parquet") {
            continue;
        }

        all_candles.extend(load_and_validate_parquet(&path)?);
    }

    if all_candles.is_empty() {
        return Err(DataError::NoData {
            symbol: symbol.to_string(),
        });
    }

    all_candles.sort_by_key(|c| c.ts);
    Ok(all_candles)
}

// ── Parquet I/O helpers ─────────────────────────────────────────────

fn candles_to_dataframe(candles: &[&Candle]) -> Result<DataFrame, DataError> {
    let ts: Vec<i64> = candles.iter().map(|c| c.ts.timestamp_millis()).collect();
    let opens: Vec<f64> = candles.iter().map(|c| c.open).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<u64> = candles.iter().map(|c| c.volume).collect();

    DataFrame::new(vec![
        Column::new("ts".into(), ts),
        Column::new("o".into(), opens),
        Column::new("h".into(), highs),
        Column::new("l".into(), lows),
        Column::new("c".into(), closes),
        Column::new("v".into(), volumes),
    ])
    .map_err(|e| DataError::Parquet(format!("dataframe creation: {e}")))
}

fn write_parquet(df: &DataFrame, path: &Path) -> Result<(), DataError> {
    let file =
        fs::File::create(path).map_err(|e| DataError::Parquet(format!("create file: {e}")))?;
    ParquetWriter::new(file)
        .finish(&mut df.clone())
        .map_err(|e| DataError::Parquet(format!("write parquet: {e}")))?;
    Ok(())
}

fn load_and_validate_parquet(path: &Path) -> Result<Vec<Candle>, DataError> {
    let file = fs::File::open(path).map_err(|e| DataError::Parquet(format!("open: {e}")))?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| DataError::Parquet(format!("read: {e}")))?;

    if df.height() == 0 {
        return Err(DataError::Validation(format!(
            "empty parquet file: {}",
            path.display()
        )));
    }

    for col_name in ["ts", "o", "h", "l", "c", "v"] {
        if df.column(col_name).is_err() {
            return Err(DataError::Validation(format!(
                "missing column '{col_name}' in {}",
                path.display()
            )));
        }
    }

    dataframe_to_candles(&df)
}

fn dataframe_to_candles(df: &DataFrame) -> Result<Vec<Candle>, DataError> {
    let map_err = |e: PolarsError| DataError::Parquet(format!("column read: {e}"));

    let ts_ca = df.column("ts").map_err(map_err)?.i64().map_err(map_err)?;
    let open_ca = df.column("o").map_err(map_err)?.f64().map_err(map_err)?;
    let high_ca = df.column("h").map_err(map_err)?.f64().map_err(map_err)?;
    let low_ca = df.column("l").map_err(map_err)?.f64().map_err(map_err)?;
    let close_ca = df.column("c").map_err(map_err)?.f64().map_err(map_err)?;
    let vol_ca = df.column("v").map_err(map_err)?.u64().map_err(map_err)?;

    let n = df.height();
    let mut candles = Vec::with_capacity(n);

    for i in 0..n {
        let millis = ts_ca
            .get(i)
            .ok_or_else(|| DataError::Validation(format!("null ts at row {i}")))?;
        let ts: DateTime<Utc> = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| DataError::Validation(format!("out-of-range ts at row {i}")))?;

        candles.push(Candle {
            ts,
            open: open_ca.get(i).unwrap_or(f64::NAN),
            high: high_ca.get(i).unwrap_or(f64::NAN),
            low: low_ca.get(i).unwrap_or(f64::NAN),
            close: close_ca.get(i).unwrap_or(f64::NAN),
            volume: vol_ca.get(i).unwrap_or(0),
        });
    }

    Ok(candles)
}
