use thiserror::Error;

/// A request that never produced a usable answer: the backend was
/// unreachable, the body could not be decoded, or the picked file could not
/// be read. The message is shown to the user verbatim after `Error: `.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Text written into an output area when a request fails.
pub fn error_text(err: &ClientError) -> String {
    format!("Error: {}", err)
}
