pub mod models;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
pub use models::{DocumentFile, UploadOutcome};
use models::{
    MemoryQueryRequest, QueryRequest, QueryResponse, UploadResponse, WelcomeResponse,
};

/// The chat demo backend, as seen from the page.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /chat`
    async fn chat(&self, query: &str) -> Result<String, ClientError>;
    /// `POST /chat_with_memory`
    async fn chat_with_memory(&self, query: &str, session_id: &str)
        -> Result<String, ClientError>;
    /// `POST /document_qa` with only a file.
    async fn upload_document(&self, file: DocumentFile) -> Result<UploadOutcome, ClientError>;
    /// `POST /document_qa` with a file and a question.
    async fn ask_document(
        &self,
        file: Option<DocumentFile>,
        query: &str,
    ) -> Result<String, ClientError>;
    /// `POST /agent`
    async fn run_agent(&self, query: &str) -> Result<String, ClientError>;
    /// `GET /`
    async fn welcome(&self) -> Result<String, ClientError>;
}

// A wrapper for the demo backend's HTTP API
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Using chat backend at: {}", base_url);
        Self {
            base_url,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn file_part(file: DocumentFile) -> Result<Part, ClientError> {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str("application/octet-stream")?;
        Ok(part)
    }

    /// Sends a JSON body and returns the `response` field of the reply.
    /// The status code is not consulted: an error reply without `response`
    /// reads as empty text, and a non-JSON error page fails to decode.
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, ClientError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with status {}", path, status);
        }

        let text = response.text().await?;
        let reply = decode::<QueryResponse>(&text)?.into_text();
        info!("{} response length: {} characters", path, reply.len());
        Ok(reply)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ClientError> {
    serde_json::from_str(text).map_err(|e| {
        debug!("Undecodable body: {}", text);
        ClientError::from(e)
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn chat(&self, query: &str) -> Result<String, ClientError> {
        let body = QueryRequest {
            query: query.to_string(),
        };
        self.post_json("/chat", &body).await
    }

    async fn chat_with_memory(
        &self,
        query: &str,
        session_id: &str,
    ) -> Result<String, ClientError> {
        let body = MemoryQueryRequest {
            query: query.to_string(),
            session_id: session_id.to_string(),
        };
        self.post_json("/chat_with_memory", &body).await
    }

    async fn upload_document(&self, file: DocumentFile) -> Result<UploadOutcome, ClientError> {
        let url = self.url("/document_qa");
        info!("Uploading {} ({} bytes)", file.file_name, file.bytes.len());

        let form = Form::new().part("file", Self::file_part(file)?);
        let response = self.client.post(&url).multipart(form).send().await?;
        let ok = response.status().is_success();
        if !ok {
            warn!("Upload rejected with status {}", response.status());
        }

        // The body is decoded before the status is looked at.
        let text = response.text().await?;
        let body: UploadResponse = decode(&text)?;
        Ok(UploadOutcome::from_response(ok, body))
    }

    async fn ask_document(
        &self,
        file: Option<DocumentFile>,
        query: &str,
    ) -> Result<String, ClientError> {
        let url = self.url("/document_qa");

        let mut form = Form::new();
        if let Some(file) = file {
            form = form.part("file", Self::file_part(file)?);
        }
        let form = form.text("query", query.to_string());

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("/document_qa answered with status {}", status);
        }

        let text = response.text().await?;
        let reply: QueryResponse = decode(&text)?;
        Ok(reply.into_text())
    }

    async fn run_agent(&self, query: &str) -> Result<String, ClientError> {
        let body = QueryRequest {
            query: query.to_string(),
        };
        self.post_json("/agent", &body).await
    }

    async fn welcome(&self) -> Result<String, ClientError> {
        let response = self.client.get(self.url("/")).send().await?;
        let text = response.text().await?;
        let reply: WelcomeResponse = decode(&text)?;
        Ok(reply.message)
    }
}
