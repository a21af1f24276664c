//! Baseline token tree the sync overrides are merged onto.
use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use std::path::Path;

const BUNDLED_BASELINE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/baseline/tokens.json"));

/// Load the baseline from `path`, or the copy bundled into the binary.
pub fn load_baseline(path: Option<&Path>) -> Result<Value> {
    let (label, text) = match path {
        Some(path) => (
            path.display().to_string(),
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?,
        ),
        None => ("bundled baseline".to_string(), BUNDLED_BASELINE.to_string()),
    };
    let value: Value = serde_json::from_str(&text).with_context(|| format!("parse {label}"))?;
    if !value.is_object() {
        return Err(anyhow!("{label} must be a JSON object"));
    }
    Ok(value)
}
