use crate::error::RateError;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CACHE_DIR: &str = ".cache_rates";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where to download the rate sheet from and where to keep it.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    pub cache_dir: PathBuf,
    pub timeout: Duration,
}

impl FetchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        FetchConfig {
            url: url.into(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Sidecar written next to a downloaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchMetadata {
    pub fetched_at: DateTime<Utc>,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedDocument {
    pub path: PathBuf,
    pub from_cache: bool,
}

/// Single-file download cache keyed by the URL's last path segment.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    config: FetchConfig,
}

impl DocumentCache {
    pub fn new(config: FetchConfig) -> Self {
        DocumentCache { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn cached_path(&self) -> PathBuf {
        self.config.cache_dir.join(file_name_for(&self.config.url))
    }

    fn metadata_path(&self) -> PathBuf {
        let mut name = file_name_for(&self.config.url);
        name.push_str(".meta");
        self.config.cache_dir.join(name)
    }

    /// Return the cached document, downloading it when absent or when `force` is set.
    pub fn fetch(&self, force: bool) -> Result<CachedDocument, RateError> {
        let path = self.cached_path();
        if path.exists() && !force {
            tracing::debug!(path = %path.display(), "using cached document");
            return Ok(CachedDocument {
                path,
                from_cache: true,
            });
        }

        let url = &self.config.url;
        tracing::info!(%url, "downloading rate sheet");
        let bytes = self.download()?;

        std::fs::create_dir_all(&self.config.cache_dir)?;
        std::fs::write(&path, &bytes)?;
        let meta = FetchMetadata {
            fetched_at: Utc::now(),
            source_url: url.clone(),
        };
        std::fs::write(self.metadata_path(), serde_json::to_string_pretty(&meta)?)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "rate sheet cached");

        Ok(CachedDocument {
            path,
            from_cache: false,
        })
    }

    /// Read the sidecar of the last download, if there is one.
    pub fn read_metadata(&self) -> Result<Option<FetchMetadata>, RateError> {
        let path = self.metadata_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn download(&self) -> Result<Vec<u8>, RateError> {
        let url = &self.config.url;
        let retrieval = |e: reqwest::Error| RateError::Retrieval {
            url: url.clone(),
            reason: e.to_string(),
        };

        let client = Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(retrieval)?;
        let response = client.get(url).send().map_err(retrieval)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "rate sheet download rejected");
            return Err(RateError::HttpStatus {
                url: url.clone(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(retrieval)?;
        Ok(bytes.to_vec())
    }
}

/// Last non-empty path segment of `url`, or `document.pdf` when there is none.
fn file_name_for(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()?
                .filter(|s| !s.is_empty())
                .last()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "document.pdf".to_string())
}

/// Read a cached document back into memory.
pub fn read_document(path: &Path) -> Result<Vec<u8>, RateError> {
    Ok(std::fs::read(path)?)
}
