//! One sync run: fetch, resolve mode, classify, merge, write.
//!
//! Hard errors never escape [`run`]; they are logged and turned into a
//! fallback write with a failing exit code. Only baseline and artifact IO
//! failures propagate, since no consistent output can be produced then.
use crate::baseline::load_baseline;
use crate::classify::classify_variable;
use crate::config::{Credentials, SyncConfig};
use crate::error::SyncError;
use crate::fetch::fetch_variables;
use crate::mode::{resolve_active_mode, ActiveMode};
use crate::normalize::normalize_name;
use crate::output::{write_artifacts, WrittenArtifacts};
use crate::schema::Variable;
use crate::tokens::{DesignTokens, SyncSummary, TokenTreeBuilder};
use anyhow::Result;

#[derive(Debug)]
pub enum SyncOutcome {
    /// Variables were fetched and classified.
    Synced,
    /// Token or file key missing; baseline-only artifacts were written.
    Fallback,
    /// A hard error occurred; empty artifacts were written.
    Failed(SyncError),
}

#[derive(Debug)]
pub struct SyncRun {
    pub outcome: SyncOutcome,
    pub tokens: DesignTokens,
    pub summary: SyncSummary,
    pub artifacts: WrittenArtifacts,
}

impl SyncRun {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, SyncOutcome::Failed(_))
    }
}

pub fn run(config: &SyncConfig) -> Result<SyncRun> {
    let baseline = load_baseline(config.baseline.as_deref())?;

    let (outcome, tokens, summary) = match config.credentials() {
        None => {
            tracing::warn!(
                "FIGMA_TOKEN or FIGMA_FILE_KEY not set; writing fallback artifacts without overrides"
            );
            (
                SyncOutcome::Fallback,
                DesignTokens::default(),
                SyncSummary::default(),
            )
        }
        Some(creds) => match sync_from_api(config, creds) {
            Ok((tokens, summary)) => (SyncOutcome::Synced, tokens, summary),
            Err(err) => {
                tracing::error!(error = %err, "token sync failed; writing fallback artifacts");
                (
                    SyncOutcome::Failed(err),
                    DesignTokens::default(),
                    SyncSummary::default(),
                )
            }
        },
    };

    let artifacts = write_artifacts(&config.out_dir, &tokens, &summary, &baseline)?;
    Ok(SyncRun {
        outcome,
        tokens,
        summary,
        artifacts,
    })
}

/// Mode resolution is the last fallible step; classification only counts.
fn sync_from_api(
    config: &SyncConfig,
    creds: Credentials<'_>,
) -> Result<(DesignTokens, SyncSummary), SyncError> {
    let response = fetch_variables(config, creds)?;
    let active = resolve_active_mode(&response.meta.variable_collections, config)?;
    tracing::info!(
        mode_id = %active.mode_id,
        mode_name = active.mode_name.as_deref().unwrap_or("<unnamed>"),
        collection_id = active.collection_id.as_deref().unwrap_or("<none>"),
        "resolved active mode"
    );
    Ok(assemble_tokens(
        &response.meta.variables,
        &active,
        config.collection_id.as_deref(),
    ))
}

/// Classify every variable into a pruned token tree and its summary.
///
/// With `collection_filter` set, variables from other collections are skipped
/// without being counted.
pub fn assemble_tokens(
    variables: &[Variable],
    active: &ActiveMode,
    collection_filter: Option<&str>,
) -> (DesignTokens, SyncSummary) {
    let mut builder = TokenTreeBuilder::new(Some(active));
    let mut filtered = 0usize;
    for variable in variables {
        if let Some(filter) = collection_filter {
            if variable.variable_collection_id.as_deref() != Some(filter) {
                tracing::trace!(id = %variable.id, "variable outside collection filter");
                filtered += 1;
                continue;
            }
        }
        let key = normalize_name(&variable.name);
        builder.record(&key, classify_variable(variable, &key, &active.mode_id));
    }
    if filtered > 0 {
        tracing::debug!(filtered, "skipped variables outside the collection filter");
    }
    builder.finish()
}
