use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("failed to fetch {url}: {reason}")]
    Retrieval { url: String, reason: String },

    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("snapshot file not found: {path}. Generate one with `ratesheet snapshot update`")]
    MissingSnapshot { path: PathBuf },

    #[error("failed to read snapshot {path}: {reason}")]
    SnapshotParse { path: PathBuf, reason: String },

    #[error("failed to load provider from {path}: {reason}")]
    ProviderLoad { path: PathBuf, reason: String },

    #[error("invalid provider: {0}")]
    ProviderInvalid(String),

    #[error("issue tracker rejected the request with HTTP {status}: {body}")]
    IssueTracker { status: u16, body: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
