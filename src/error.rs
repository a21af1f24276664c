//! Hard failures that abort the network-dependent part of a sync.
//!
//! Soft outcomes (missing credentials, a single unresolvable variable) are not
//! errors; see `sync::SyncOutcome` and `classify::Classification`.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// The variables endpoint answered with a non-success status.
    #[error("variables request failed: {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("variables request failed: {0}")]
    Transport(#[source] ureq::Error),

    /// The response body was not the JSON shape we read.
    #[error("decode variables response: {0}")]
    Decode(#[source] ureq::Error),

    /// No collection or override yielded a mode id.
    #[error("no active mode could be resolved from {collections} collection(s)")]
    NoActiveMode { collections: usize },

    /// `--strict-collection` was set and the override id is not in the response.
    #[error("variable collection {0} not found in response")]
    CollectionNotFound(String),
}
