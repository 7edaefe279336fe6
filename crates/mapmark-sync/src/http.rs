//! JSON-over-HTTP implementation of [`SnapshotTransport`].

use async_trait::async_trait;
use tracing::debug;

use mapmark_types::{Marker, MarkerId, Snapshot};

use crate::{Result, SnapshotTransport, SyncError};

/// Header carrying the acting user, when one is configured.
const USER_HEADER: &str = "X-Mapmark-User";

/// Talks to a snapshot server over HTTP.
///
/// Endpoints, relative to the configured base URL:
///
/// - `GET  /snapshots`      — full remote history as snapshot records
/// - `POST /snapshots`      — replace remote history
/// - `POST /markers`        — notify of a locally added marker
/// - `DELETE /markers/{id}` — notify of a locally deleted marker
///
/// Bodies are the record formats from `mapmark-types`; a response that
/// fails record validation aborts the fetch with
/// [`SyncError::MalformedPayload`] before any store is touched.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    username: Option<String>,
}

impl HttpTransport {
    /// Create a transport for `base_url` (e.g. `http://localhost:8080/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: None,
        }
    }

    /// Attach a username sent with every request.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn identified(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.username {
            Some(username) => request.header(USER_HEADER, username),
            None => request,
        }
    }
}

async fn require_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SyncError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SnapshotTransport for HttpTransport {
    async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>> {
        let url = self.url("snapshots");
        debug!(%url, "fetch snapshots");
        let response = self.identified(self.client.get(&url)).send().await?;
        let body = require_success(response).await?.text().await?;
        let snapshots: Vec<Snapshot> = serde_json::from_str(&body)
            .map_err(|e| SyncError::MalformedPayload(e.to_string()))?;
        Ok(snapshots)
    }

    async fn upload_snapshots(&self, snapshots: &[Snapshot]) -> Result<()> {
        let url = self.url("snapshots");
        debug!(%url, count = snapshots.len(), "upload snapshots");
        let response = self
            .identified(self.client.post(&url))
            .json(snapshots)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }

    async fn notify_marker_added(&self, marker: &Marker) -> Result<()> {
        let response = self
            .identified(self.client.post(self.url("markers")))
            .json(marker)
            .send()
            .await?;
        require_success(response).await?;
        Ok(())
    }

    async fn notify_marker_deleted(&self, id: &MarkerId) -> Result<()> {
        let url = self.url(&format!("markers/{}", id.as_str()));
        let response = self.identified(self.client.delete(&url)).send().await?;
        require_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_normalizes_slashes() {
        let transport = HttpTransport::new("http://localhost:8080/api/");
        assert_eq!(transport.base_url(), "http://localhost:8080/api");
        assert_eq!(transport.url("snapshots"), "http://localhost:8080/api/snapshots");
        assert_eq!(transport.url("/markers"), "http://localhost:8080/api/markers");
    }
}
