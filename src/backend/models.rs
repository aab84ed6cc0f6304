use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemoryQueryRequest {
    pub query: String,
    pub session_id: String,
}

/// A missing or null `response` reads as empty text, as the page shows it.
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: Option<Value>,
}

impl QueryResponse {
    pub fn into_text(self) -> String {
        self.response.and_then(value_text).unwrap_or_default()
    }
}

/// Display text of a JSON field: strings verbatim, other values as JSON.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Body of a `/document_qa` upload reply. Successful replies carry
/// `message`, failed ones carry `detail`; either may be absent.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: Option<Value>,
    pub detail: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted { message: Option<String> },
    Rejected { detail: Option<String> },
}

impl UploadOutcome {
    pub fn from_response(ok: bool, body: UploadResponse) -> Self {
        if ok {
            UploadOutcome::Accepted {
                message: body.message.and_then(value_text),
            }
        } else {
            UploadOutcome::Rejected {
                detail: body.detail.and_then(value_text),
            }
        }
    }
}

/// A picked file, read into memory at the moment it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub async fn read(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        Ok(Self { file_name, bytes })
    }
}
