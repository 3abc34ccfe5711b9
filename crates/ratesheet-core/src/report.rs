use crate::diff::render::render_markdown;
use crate::diff::FieldChange;
use crate::error::RateError;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

const GITHUB_API: &str = "https://api.github.com";

/// An issue ready to be filed: one title line and a Markdown body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeReport {
    pub title: String,
    pub body: String,
}

impl ChangeReport {
    pub fn build(
        utility: &str,
        changes: &[FieldChange],
        snapshot_path: &Path,
        now: DateTime<Utc>,
    ) -> Self {
        let title = format!(
            "{} rate change detected – {}",
            utility,
            now.format("%Y-%m-%d %H:%M UTC")
        );

        let body = [
            format!(
                "A difference between the current {utility} rates PDF and the stored snapshot has been detected.\n"
            ),
            "## Summary of changes\n".to_string(),
            render_markdown(changes),
            "\n---\n".to_string(),
            format!("Snapshot file: `{}`", snapshot_path.display()),
        ]
        .join("\n");

        ChangeReport { title, body }
    }
}

/// Files change reports as GitHub issues.
pub struct IssueTracker {
    client: Client,
    endpoint: String,
}

impl IssueTracker {
    pub fn github(repository: &str, token: &str, timeout: Duration) -> Result<Self, RateError> {
        if repository.trim().is_empty() || !repository.contains('/') {
            return Err(RateError::Config(format!(
                "repository must look like owner/name, got '{repository}'"
            )));
        }
        if token.trim().is_empty() {
            return Err(RateError::Config("GitHub token is empty".into()));
        }

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| RateError::Config("GitHub token contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ratesheet/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RateError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(IssueTracker {
            client,
            endpoint: format!("{GITHUB_API}/repos/{}/issues", repository.trim()),
        })
    }

    /// Configure from `GITHUB_REPOSITORY` and `GITHUB_TOKEN`.
    pub fn from_env(timeout: Duration) -> Result<Self, RateError> {
        Self::from_vars(
            std::env::var("GITHUB_REPOSITORY").ok(),
            std::env::var("GITHUB_TOKEN").ok(),
            timeout,
        )
    }

    fn from_vars(
        repository: Option<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RateError> {
        let repository =
            repository.ok_or_else(|| RateError::Config("GITHUB_REPOSITORY not set".into()))?;
        let token = token.ok_or_else(|| RateError::Config("GITHUB_TOKEN not set".into()))?;
        Self::github(&repository, &token, timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn create_issue(&self, report: &ChangeReport) -> Result<(), RateError> {
        let retrieval = |e: reqwest::Error| RateError::Retrieval {
            url: self.endpoint.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(report)
            .send()
            .map_err(retrieval)?;
        let status = response.status();
        if status.as_u16() >= 300 {
            let body = error_body(response.text());
            return Err(RateError::IssueTracker {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(endpoint = %self.endpoint, title = %report.title, "issue created");
        Ok(())
    }
}

/// Body of a rejected request, keeping the read failure when there is one.
fn error_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn changes() -> Vec<FieldChange> {
        vec![FieldChange {
            section: "residential_standard".into(),
            field: "energy_rate".into(),
            old: Some(dec!(0.08058)),
            new: Some(dec!(0.0821)),
        }]
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_title_format() {
        let report = ChangeReport::build("CEMC", &changes(), Path::new("snap.json"), now());
        assert_eq!(report.title, "CEMC rate change detected – 2025-12-01 09:05 UTC");
    }

    #[test]
    fn test_body_layout() {
        let report = ChangeReport::build(
            "CEMC",
            &changes(),
            Path::new("snapshots/residential_v1.json"),
            now(),
        );
        let body = &report.body;
        assert!(body.starts_with("A difference between the current CEMC rates PDF"));
        let summary = body.find("## Summary of changes").unwrap();
        let change = body.find("- **energy_rate**: `0.08058` → `0.0821`").unwrap();
        let rule = body.find("---").unwrap();
        assert!(summary < change && change < rule);
        assert!(body.ends_with("Snapshot file: `snapshots/residential_v1.json`"));
    }

    #[test]
    fn test_tracker_requires_env() {
        let timeout = Duration::from_secs(1);
        let err = IssueTracker::from_vars(None, Some("t".into()), timeout).err().unwrap();
        assert!(err.to_string().contains("GITHUB_REPOSITORY"));
        let err = IssueTracker::from_vars(Some("o/r".into()), None, timeout).err().unwrap();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_error_body_keeps_read_failure() {
        let ok: Result<String, &str> = Ok(r#"{"message":"Bad credentials"}"#.into());
        assert_eq!(error_body(ok), r#"{"message":"Bad credentials"}"#);
        let failed: Result<String, &str> = Err("connection reset");
        assert_eq!(error_body(failed), "<unreadable body: connection reset>");
    }

    #[test]
    fn test_tracker_endpoint() {
        let tracker = IssueTracker::github("acme/rates", "secret", Duration::from_secs(1)).unwrap();
        assert_eq!(tracker.endpoint(), "https://api.github.com/repos/acme/rates/issues");
        assert!(IssueTracker::github("acme", "secret", Duration::from_secs(1)).is_err());
    }
}
