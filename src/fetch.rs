//! Single GET against the Figma variables endpoint.
use crate::config::{Credentials, SyncConfig};
use crate::error::SyncError;
use crate::schema::VariablesResponse;
use ureq::http::StatusCode;

const TOKEN_HEADER: &str = "X-Figma-Token";

/// Fetch and decode `/files/{fileKey}/variables`.
///
/// Status errors are disabled on the agent so a non-2xx answer can be reported
/// with its code and reason instead of an opaque transport error.
pub fn fetch_variables(
    config: &SyncConfig,
    creds: Credentials<'_>,
) -> Result<VariablesResponse, SyncError> {
    let url = config.variables_url(creds.file_key);
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(config.timeout)
        .build()
        .into();

    tracing::info!(%url, "fetching variables");
    let mut response = agent
        .get(&url)
        .header(TOKEN_HEADER, creds.token)
        .call()
        .map_err(SyncError::Transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Fetch {
            status: status.as_u16(),
            status_text: reason_phrase(status).to_string(),
        });
    }

    let body: VariablesResponse = response
        .body_mut()
        .read_json()
        .map_err(SyncError::Decode)?;
    tracing::debug!(
        variables = body.meta.variables.len(),
        collections = body.meta.variable_collections.len(),
        "decoded variables response"
    );
    Ok(body)
}

fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("unknown status")
}
