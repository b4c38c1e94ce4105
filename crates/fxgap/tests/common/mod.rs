//! Shared fixtures for fxgap integration tests

use chrono::TimeDelta;
use fxgap::core::test_utils::{quote_at, to_export_text, ts};
use fxgap::Quote;
use std::fs;
use std::path::{Path, PathBuf};

/// Quotes at the given minute offsets from Tuesday 2023-01-03 00:00
pub fn quotes_at_offsets(offsets: &[i64], spreads: &[u32]) -> Vec<Quote> {
    let start = ts(2023, 1, 3, 0, 0);
    offsets
        .iter()
        .enumerate()
        .map(|(i, &m)| {
            let spread = spreads[i % spreads.len()];
            quote_at(start + TimeDelta::minutes(m), 1.07 + i as f64 * 1e-5, spread)
        })
        .collect()
}

/// Write quotes as a terminal export into `dir`, returning the file path
pub fn write_export(dir: &Path, name: &str, quotes: &[Quote]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, to_export_text(quotes)).expect("write fixture");
    path
}
