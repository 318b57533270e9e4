use thiserror::Error;

use crate::model::FormErrors;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("refresh failed: {0}")]
    Refresh(#[from] RefreshError),
    #[error("invalid input:\n{0}")]
    Form(#[from] FormErrors),
    #[error("command failed: {0}")]
    Command(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// A payload crossed a trust boundary without matching the record schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("payload is not valid json: {0}")]
    Json(String),
    #[error("expected an array of records, got {0}")]
    NotAnArray(&'static str),
    #[error("record {index}: {message}")]
    Record { index: usize, message: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage read failed for key {key}")]
    Read {
        key: String,
        source: std::io::Error,
    },
    #[error("storage write failed for key {key}")]
    Write {
        key: String,
        source: std::io::Error,
    },
    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("persist failed: {0}")]
    Persist(#[from] StorageError),
    #[error("serialize failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no task id left after {max}")]
    IdExhausted { max: i64 },
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error ({kind}) url={url}: {message}")]
    Transport {
        kind: &'static str,
        url: String,
        message: String,
    },
    #[error("unexpected status {status} url={url}: {preview}")]
    Status {
        status: u16,
        url: String,
        preview: String,
    },
    #[error("response rejected by schema: {0}")]
    Schema(#[from] SchemaError),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A refresh either failed to fetch (store untouched) or fetched and failed to persist.
#[derive(Error, Debug)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Renders an error and its sources as `outer: inner`, skipping any cause whose text the
/// message so far already embeds.
pub fn format_error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        let text = c.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        cause = c.source();
    }
    out
}
