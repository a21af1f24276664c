//! Artifact writing for a sync run.
//!
//! Every run writes all three artifacts, fallback runs included, so the
//! downstream build always finds a consistent set.
use crate::merge::deep_merge;
use crate::tokens::{DesignTokens, SyncSummary};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_PATH: &str = "tokens/figma-sync-report.json";
pub const MODULE_PATH: &str = "src/theme/figma-overrides.ts";
pub const THEME_CACHE_PATH: &str = ".cache/theme-tokens.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncReport<'a> {
    generated_at: String,
    summary: &'a SyncSummary,
    tokens: &'a DesignTokens,
}

/// Paths written by [`write_artifacts`].
#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub report: PathBuf,
    pub module: PathBuf,
    pub theme_cache: PathBuf,
}

/// Write the report, the override module, and the merged theme cache.
pub fn write_artifacts(
    out_dir: &Path,
    tokens: &DesignTokens,
    summary: &SyncSummary,
    baseline: &Value,
) -> Result<WrittenArtifacts> {
    let report = SyncReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        summary,
        tokens,
    };
    let report_path = write_json(out_dir, REPORT_PATH, &report)?;

    let module_path = write_text(out_dir, MODULE_PATH, &render_override_module(tokens)?)?;

    let overrides = serde_json::to_value(tokens).context("serialize token overrides")?;
    let theme = deep_merge(baseline, &overrides);
    let theme_path = write_json(out_dir, THEME_CACHE_PATH, &theme)?;

    tracing::info!(
        report = %report_path.display(),
        module = %module_path.display(),
        theme_cache = %theme_path.display(),
        "wrote token artifacts"
    );
    Ok(WrittenArtifacts {
        report: report_path,
        module: module_path,
        theme_cache: theme_path,
    })
}

/// TypeScript module exporting the partial override tree.
pub fn render_override_module(tokens: &DesignTokens) -> Result<String> {
    let json = serde_json::to_string_pretty(tokens).context("serialize token overrides")?;
    let mut out = String::new();
    out.push_str("// Generated by tokensync from Figma variables. Do not edit by hand.\n\n");
    out.push_str(&format!(
        "export const figmaTokenOverrides = {json} as const;\n\n"
    ));
    out.push_str(&format!(
        "export const hasFigmaOverrides = {};\n\n",
        tokens.has_overrides()
    ));
    out.push_str("export default figmaTokenOverrides;\n");
    Ok(out)
}

pub fn write_json<T: Serialize>(root: &Path, rel_path: &str, value: &T) -> Result<PathBuf> {
    let mut bytes = serde_json::to_vec_pretty(value).context("serialize artifact JSON")?;
    bytes.push(b'\n');
    write_bytes(root, rel_path, &bytes)
}

fn write_text(root: &Path, rel_path: &str, text: &str) -> Result<PathBuf> {
    write_bytes(root, rel_path, text.as_bytes())
}

/// Write through a sibling temp file and rename it into place.
fn write_bytes(root: &Path, rel_path: &str, bytes: &[u8]) -> Result<PathBuf> {
    let dest = root.join(rel_path);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file_name = dest
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("artifact");
    let tmp_path = dest
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"));
    fs::write(&tmp_path, bytes).with_context(|| format!("write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &dest).with_context(|| format!("publish {}", dest.display()))?;
    Ok(dest)
}
