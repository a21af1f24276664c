//! CLI argument parsing for the token sync workflow.
//!
//! Every setting can come from a flag or its environment variable; clap folds
//! both into the args struct so the rest of the crate never reads the
//! environment itself.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default Figma REST API base when `FIGMA_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com/v1";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "tokensync",
    version,
    about = "Sync Figma variables into design-token artifacts",
    after_help = "Examples:\n  FIGMA_TOKEN=... FIGMA_FILE_KEY=... tokensync sync\n  tokensync sync --out-dir web --json\n  tokensync merge --overrides tokens/figma-sync-report.json --out theme.json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Emit debug-level logs (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Sync(SyncArgs),
    Merge(MergeArgs),
}

/// Inputs for a full fetch, classify, merge, and write run.
#[derive(Parser, Debug)]
#[command(about = "Fetch variables and write token artifacts")]
pub struct SyncArgs {
    /// Figma personal access token
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Figma file key holding the variables
    #[arg(long, env = "FIGMA_FILE_KEY")]
    pub file_key: Option<String>,

    /// Only sync variables from this collection (also selects the active collection)
    #[arg(long, value_name = "ID", env = "FIGMA_VARIABLE_COLLECTION_ID")]
    pub collection_id: Option<String>,

    /// Resolve values for this mode instead of the collection default
    #[arg(long, value_name = "ID", env = "FIGMA_MODE_ID")]
    pub mode_id: Option<String>,

    /// API base URL
    #[arg(long, value_name = "URL", env = "FIGMA_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Abort the variables request after this many seconds
    #[arg(long, value_name = "SECS", env = "FIGMA_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Fail instead of falling back when --collection-id is not in the response
    #[arg(long)]
    pub strict_collection: bool,

    /// Root directory the artifacts are written under
    #[arg(long, value_name = "DIR", env = "TOKENSYNC_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Baseline token JSON to merge over (defaults to the bundled baseline)
    #[arg(long, value_name = "PATH", env = "TOKENSYNC_BASELINE")]
    pub baseline: Option<PathBuf>,

    /// Print the sync summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Inputs for merging an existing override tree onto the baseline offline.
#[derive(Parser, Debug)]
#[command(about = "Deep-merge a token override file over the baseline")]
pub struct MergeArgs {
    /// Override JSON: a token tree or a sync report (its `tokens` field is used)
    #[arg(long, value_name = "PATH")]
    pub overrides: PathBuf,

    /// Baseline token JSON (defaults to the bundled baseline)
    #[arg(long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Output path for the merged theme; stdout when omitted
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}
