//! Resolved run configuration.
//!
//! Built once from the parsed CLI args and passed by reference to each stage.
use crate::cli::SyncArgs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub token: Option<String>,
    pub file_key: Option<String>,
    pub collection_id: Option<String>,
    pub mode_id: Option<String>,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub strict_collection: bool,
    pub out_dir: PathBuf,
    pub baseline: Option<PathBuf>,
}

/// Token and file key, present only when both are configured.
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub token: &'a str,
    pub file_key: &'a str,
}

impl SyncConfig {
    pub fn from_args(args: &SyncArgs) -> Self {
        Self {
            token: non_empty(args.token.as_deref()),
            file_key: non_empty(args.file_key.as_deref()),
            collection_id: non_empty(args.collection_id.as_deref()),
            mode_id: non_empty(args.mode_id.as_deref()),
            base_url: args.api_base.trim().trim_end_matches('/').to_string(),
            timeout: args.timeout_secs.map(Duration::from_secs),
            strict_collection: args.strict_collection,
            out_dir: args.out_dir.clone(),
            baseline: args.baseline.clone(),
        }
    }

    pub fn credentials(&self) -> Option<Credentials<'_>> {
        Some(Credentials {
            token: self.token.as_deref()?,
            file_key: self.file_key.as_deref()?,
        })
    }

    pub fn variables_url(&self, file_key: &str) -> String {
        format!("{}/files/{}/variables", self.base_url, file_key)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
