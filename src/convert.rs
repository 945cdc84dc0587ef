// Conversion service client
//
// One multipart POST per submission. The client enforces its own 300-second
// timeout independent of anything the server does; a timed-out or failed
// call surfaces as a terminal failure and is never retried automatically.
//
// Errors cross this boundary as the exact display string the preview shows:
// the server's `message` field if present, else its `error` field, else the
// raw transport error text, prefixed with a fixed label.

use crate::payload::ResultPayload;
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Default conversion endpoint (matches the reference backend's route)
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:8000/api/fileConverter/upload";

/// Client-side upload timeout, independent of any server-side timeout
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Fixed label every upload-path error message starts with
pub const ERROR_PREFIX: &str = "Error processing file: ";

/// Upload lifecycle state. Exactly one instance exists at a time and the
/// transitions are strictly sequential: idle -> pending -> succeeded or
/// failed -> idle on the next selection. Pending implies exactly one
/// outstanding request generation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// HTTP client for the conversion endpoint.
#[derive(Debug, Clone)]
pub struct Converter {
    client: reqwest::Client,
    url: String,
}

impl Converter {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url })
    }

    /// Upload one file and return the conversion payload.
    ///
    /// Every error is returned as a ready-to-display string carrying the
    /// `ERROR_PREFIX` label; nothing else crosses into the UI layers.
    pub async fn convert(&self, path: &Path) -> Result<ResultPayload, String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| format!("{ERROR_PREFIX}{e}"))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        tracing::info!(file = %file_name, size = bytes.len(), "uploading file for conversion");

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("{ERROR_PREFIX}{e}"))?;

        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!(%status, "conversion request failed");
            return Err(failure_message(status, &body));
        }

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| format!("{ERROR_PREFIX}{e}"))?;
        Ok(extract_payload(value))
    }
}

/// Map a non-success response to a display message.
///
/// Priority: server `message` field, then server `error` field, then the
/// raw status text.
fn failure_message(status: StatusCode, body: &[u8]) -> String {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            string_field(&v, "message").or_else(|| string_field(&v, "error"))
        })
        .unwrap_or_else(|| format!("server returned {status}"));
    format!("{ERROR_PREFIX}{detail}")
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// A nested `data` field carries the real result when present; otherwise
/// the whole body does. String payloads pass through as text.
fn extract_payload(value: Value) -> ResultPayload {
    let inner = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    match inner {
        Value::String(s) => ResultPayload::Text(s),
        other => ResultPayload::Structured(other),
    }
}
