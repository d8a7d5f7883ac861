//! Update checks.
//!
//! The update endpoint serves a small JSON document:
//!
//! ```json
//! { "version": "1.2.0", "url": "https://example.org/download" }
//! ```

use std::cmp::Ordering;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Latest release as published by the update endpoint.
///
/// Missing fields are tolerated: an absent version reads as `0.0.0` and
/// an absent URL as empty.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReleaseInfo {
    /// Released version, dotted numeric.
    pub version: String,
    /// Download page.
    pub url: String,
}

impl Default for ReleaseInfo {
    fn default() -> Self {
        Self {
            version: "0.0.0".to_string(),
            url: String::new(),
        }
    }
}

/// Outcome of an update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// A newer release exists.
    Available {
        /// Newer version.
        version: String,
        /// Where to get it.
        url: String,
    },
    /// The running version is current.
    UpToDate,
}

/// Queries the update endpoint.
#[derive(Debug, Clone)]
pub struct UpdateChecker {
    client: reqwest::Client,
    url: String,
    current: String,
}

impl UpdateChecker {
    /// Create a checker for `url`, comparing against `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, current: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fireplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::update_check(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
            current: current.into(),
        })
    }

    /// Fetch the published release information.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or a
    /// malformed body.
    pub async fn fetch(&self) -> Result<ReleaseInfo> {
        debug!(url = %self.url, "checking for updates");

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            warn!(error = %e, "update request failed");
            Error::update_check(format!("request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "update endpoint returned an error");
            return Err(Error::update_check(format!("server returned {status}")));
        }

        response.json::<ReleaseInfo>().await.map_err(|e| {
            warn!(error = %e, "update response could not be decoded");
            Error::update_check(format!("invalid response: {e}"))
        })
    }

    /// Check whether a newer release is available.
    ///
    /// # Errors
    ///
    /// See [`UpdateChecker::fetch`].
    pub async fn check(&self) -> Result<UpdateStatus> {
        let release = self.fetch().await?;

        if compare_versions(&release.version, &self.current) == Ordering::Greater {
            info!(latest = %release.version, current = %self.current, "update available");
            Ok(UpdateStatus::Available {
                version: release.version,
                url: release.url,
            })
        } else {
            debug!(latest = %release.version, "already up to date");
            Ok(UpdateStatus::UpToDate)
        }
    }
}

/// Compare dotted numeric versions component by component.
///
/// Missing components count as zero and a leading `v` is ignored, so
/// `1.10` is newer than `1.9` and `v1.2` equals `1.2.0`. Non-numeric
/// components compare as zero.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.trim()
            .trim_start_matches(['v', 'V'])
            .split('.')
            .map(|part| {
                let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };

    let (a, b) = (parse(a), parse(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn checker(url: &str, current: &str) -> UpdateChecker {
        UpdateChecker::new(url, current, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("v2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("0.9", "1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.2.3-beta", "1.2.3"), Ordering::Equal);
    }

    #[tokio::test]
    async fn test_newer_version_available() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"version": "1.10.0", "url": "https://example.org/dl"}"#);
            })
            .await;

        let status = checker(&server.url("/version.json"), "1.9.0")
            .check()
            .await
            .unwrap();

        assert_eq!(
            status,
            UpdateStatus::Available {
                version: "1.10.0".to_string(),
                url: "https://example.org/dl".to_string(),
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_same_version_is_up_to_date() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(200)
                    .body(r#"{"version": "1.0.0", "url": "https://example.org/dl"}"#);
            })
            .await;

        let status = checker(&server.url("/version.json"), "1.0.0")
            .check()
            .await
            .unwrap();
        assert_eq!(status, UpdateStatus::UpToDate);
    }

    #[tokio::test]
    async fn test_manifest_without_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(200).body(r#"{"version": "2.0.0"}"#);
            })
            .await;

        let status = checker(&server.url("/version.json"), "1.0.0")
            .check()
            .await
            .unwrap();
        assert_eq!(
            status,
            UpdateStatus::Available {
                version: "2.0.0".to_string(),
                url: String::new(),
            }
        );
    }

    #[tokio::test]
    async fn test_empty_manifest_is_up_to_date() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(200).body("{}");
            })
            .await;

        let release = checker(&server.url("/version.json"), "1.0.0")
            .fetch()
            .await
            .unwrap();
        assert_eq!(release, ReleaseInfo::default());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_update_check() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let err = checker(&server.url("/version.json"), "1.0.0")
            .check()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpdateCheck(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_update_check() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/version.json");
                then.status(200).body("not json");
            })
            .await;

        let err = checker(&server.url("/version.json"), "1.0.0")
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpdateCheck(msg) if msg.starts_with("invalid response")));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let err = checker("http://127.0.0.1:9/version.json", "1.0.0")
            .check()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpdateCheck(_)));
    }
}
