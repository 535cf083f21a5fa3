//! Sharing recordings through a rewindtty upload server.
//!
//! The server takes a JSON document `{"metadata": {...}, "sessions": [...]}`
//! and answers with the id of the stored recording, which the web player
//! serves at `<player url>/<id>`.

use std::time::Duration;

use serde_json::{json, Value};

use crate::recording::{Recording, RecordingError};

pub const DEFAULT_UPLOAD_URL: &str = "https://upload.rewindtty.dev/upload";
pub const DEFAULT_PLAYER_URL: &str = "https://play.rewindtty.dev/play";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from preparing or sending an upload.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Recording(#[from] RecordingError),

    #[error("Upload failed with HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Upload failed: {0}")]
    Transport(String),

    #[error("Failed to read upload response: {0}")]
    Response(#[from] std::io::Error),
}

/// What the server reported for a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub status: u16,
    /// Id assigned by the server, if the response carried one
    pub id: Option<String>,
}

impl UploadReceipt {
    /// Web player address of the uploaded recording.
    pub fn player_url(&self, player_base: &str) -> Option<String> {
        self.id
            .as_ref()
            .map(|id| format!("{}/{}", player_base.trim_end_matches('/'), id))
    }
}

/// `User-Agent` sent with uploads.
pub fn user_agent() -> String {
    format!("rewindtty-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Wrap a recording in the upload document.
pub fn payload(recording: &Recording) -> Value {
    let total_duration: f64 = recording.sessions().iter().map(|s| s.duration).sum();
    json!({
        "metadata": {
            "client": user_agent(),
            "uploaded_at": chrono::Utc::now().to_rfc3339(),
            "total_commands": recording.len(),
            "total_duration": total_duration,
        },
        "sessions": recording,
    })
}

/// Build the upload document from a file's content.
///
/// A bare session list is wrapped with fresh metadata. A document that
/// already has `metadata` and a `sessions` list is sent as is, once its
/// sessions pass the usual recording checks.
pub fn payload_from_str(content: &str) -> Result<Value, UploadError> {
    let document: Value = serde_json::from_str(content).map_err(RecordingError::from)?;
    match document {
        Value::Array(_) => Ok(payload(&Recording::from_json_str(content)?)),
        Value::Object(ref fields) => {
            if !fields.contains_key("metadata") {
                return Err(RecordingError::malformed("missing 'metadata' field").into());
            }
            match fields.get("sessions") {
                Some(sessions @ Value::Array(_)) => {
                    Recording::from_json_str(&sessions.to_string())?;
                    Ok(document)
                }
                Some(_) => Err(RecordingError::malformed("'sessions' must be a list").into()),
                None => Err(RecordingError::malformed("missing 'sessions' field").into()),
            }
        }
        _ => Err(RecordingError::malformed("expected a list of sessions").into()),
    }
}

/// Pull the recording id out of a response body.
///
/// The id may be a string or a number; anything else yields `None`.
pub fn parse_id(body: &str) -> Option<String> {
    let response: Value = serde_json::from_str(body).ok()?;
    match response.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(n) => Some(match (n.as_u64(), n.as_i64(), n.as_f64()) {
            (Some(u), _, _) => u.to_string(),
            (None, Some(i), _) => i.to_string(),
            (None, None, Some(f)) => format!("{:.0}", f),
            _ => n.to_string(),
        }),
        _ => None,
    }
}

/// HTTP client for an upload endpoint.
pub struct Uploader {
    agent: ureq::Agent,
    url: String,
}

impl Uploader {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(&user_agent())
            .build();
        Self {
            agent,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the document. Any status outside 2xx is an error carrying the
    /// response body.
    pub fn upload(&self, document: &Value) -> Result<UploadReceipt, UploadError> {
        tracing::info!(url = %self.url, "uploading recording");
        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&document.to_string());

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(UploadError::Status { status, body });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(UploadError::Transport(transport.to_string()));
            }
        };

        let status = response.status();
        let body = response.into_string()?;
        if !(200..300).contains(&status) {
            return Err(UploadError::Status { status, body });
        }

        let id = parse_id(&body);
        if id.is_none() {
            tracing::warn!(%body, "upload response has no id");
        }
        Ok(UploadReceipt { status, id })
    }
}
