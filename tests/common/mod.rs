//! Shared test infrastructure for integration tests.

use httpmock::prelude::*;
use httpmock::Mock;
use std::path::Path;
use std::process::{Command, Output};

/// Environment the binary or its HTTP client reads; cleared so the host cannot leak in.
const CLEARED_ENV: &[&str] = &[
    "FIGMA_TOKEN",
    "FIGMA_FILE_KEY",
    "FIGMA_VARIABLE_COLLECTION_ID",
    "FIGMA_MODE_ID",
    "FIGMA_API_BASE",
    "FIGMA_TIMEOUT_SECS",
    "TOKENSYNC_OUT_DIR",
    "TOKENSYNC_BASELINE",
    "RUST_LOG",
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Mocks `GET /v1/files/{file_key}/variables` answered only for `token`.
pub fn variables_mock<'a>(
    server: &'a MockServer,
    file_key: &str,
    token: &str,
    status: u16,
    body: &str,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v1/files/{file_key}/variables"))
            .header("x-figma-token", token);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// API base URL pointing at the mock server.
pub fn api_base(server: &MockServer) -> String {
    server.url("/v1")
}

/// A `tokensync sync` command with a clean environment writing into `out_dir`.
pub fn sync_command(out_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tokensync"));
    for key in CLEARED_ENV {
        cmd.env_remove(key);
    }
    cmd.env("NO_COLOR", "1")
        .arg("sync")
        .arg("--out-dir")
        .arg(out_dir);
    cmd
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("read {}: {err}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|err| panic!("parse {}: {err}", path.display()))
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
