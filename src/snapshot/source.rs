//! Snapshot Sources
//!
//! Where a refresh reads the snapshot document from. The HTTP source defeats
//! intermediate caches by appending the current time as a `t` query parameter.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::error::{SnapshotError, SnapshotResult};
use super::types::Snapshot;
use crate::config::SourceConfig;

/// A place a snapshot document can be fetched from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Human-readable location, used in logs
    fn describe(&self) -> String;

    /// Fetch and parse one fresh copy of the snapshot
    async fn fetch(&self) -> SnapshotResult<Snapshot>;
}

/// Snapshot served over HTTP, e.g. `http://host/static/data.json`
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Create a source for the given URL
    pub fn new(url: &str, timeout: Duration) -> SnapshotResult<Self> {
        let url = Url::parse(url)
            .map_err(|e| SnapshotError::InvalidSource(format!("{}: {}", url, e)))?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }

    /// URL for one fetch, with the cache-busting timestamp appended
    pub fn cache_busted_url(&self, timestamp_ms: i64) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("t", &timestamp_ms.to_string());
        url
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> SnapshotResult<Snapshot> {
        let url = self.cache_busted_url(Utc::now().timestamp_millis());

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(SnapshotError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Snapshot::from_slice(&body)
    }
}

/// Snapshot read straight from the producer's output file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> SnapshotResult<Snapshot> {
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SnapshotError::Io {
                path: self.path.clone(),
                source,
            })?;

        Snapshot::from_slice(&body)
    }
}

/// Build the configured source. A URL takes precedence over a path.
pub fn build_source(config: &SourceConfig) -> SnapshotResult<Arc<dyn SnapshotSource>> {
    if let Some(url) = config.url.as_deref().filter(|u| !u.is_empty()) {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        return Ok(Arc::new(HttpSource::new(url, timeout)?));
    }

    match config.path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => Ok(Arc::new(FileSource::new(path))),
        None => Err(SnapshotError::InvalidSource(
            "either source.url or source.path must be set".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Router};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BODY: &str = r#"{"accounts": [{"gameName": "LeGreedou", "tagLine": "EUW", "dpm": "x",
        "rank_info": {"tier": "GOLD", "rank": "II", "lp": 40}}]}"#;

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_cache_busted_url() {
        let source = HttpSource::new(
            "http://localhost:5000/static/data.json",
            Duration::from_secs(5),
        )
        .unwrap();

        let url = source.cache_busted_url(1733338800123);
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/static/data.json?t=1733338800123"
        );
    }

    #[test]
    fn test_cache_busting_keeps_existing_query() {
        let source =
            HttpSource::new("http://localhost/data.json?v=2", Duration::from_secs(5)).unwrap();
        let url = source.cache_busted_url(7);
        assert_eq!(url.as_str(), "http://localhost/data.json?v=2&t=7");
    }

    #[tokio::test]
    async fn test_http_source_sends_timestamp() {
        // Only answers when the cache-busting parameter arrives
        let router = Router::new().route(
            "/static/data.json",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                match query.get("t").map(|t| t.parse::<i64>()) {
                    Some(Ok(_)) => (StatusCode::OK, BODY),
                    _ => (StatusCode::BAD_REQUEST, ""),
                }
            }),
        );
        let base = spawn_server(router).await;

        let source =
            HttpSource::new(&format!("{}/static/data.json", base), Duration::from_secs(5)).unwrap();
        let snapshot = source.fetch().await.unwrap();
        assert_eq!(snapshot.accounts[0].game_name, "LeGreedou");
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let router = Router::new().route(
            "/static/data.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let base = spawn_server(router).await;

        let source =
            HttpSource::new(&format!("{}/static/data.json", base), Duration::from_secs(5)).unwrap();
        match source.fetch().await {
            Err(SnapshotError::Status { status, url }) => {
                assert_eq!(status, 503);
                assert!(url.contains("/static/data.json?t="));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_source_malformed_body() {
        let router = Router::new().route("/data.json", get(|| async { "<html></html>" }));
        let base = spawn_server(router).await;

        let source =
            HttpSource::new(&format!("{}/data.json", base), Duration::from_secs(5)).unwrap();
        assert!(matches!(source.fetch().await, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = HttpSource::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(SnapshotError::InvalidSource(_))));
    }

    #[tokio::test]
    async fn test_file_source_reads_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"accounts": [{{"gameName": "ArkoSs", "tagLine": "akali", "dpm": "x",
                "rank_info": {{"tier": "CHALLENGER", "rank": "I", "lp": 350}}}}]}}"#
        )
        .unwrap();

        let source = FileSource::new(file.path());
        let snapshot = source.fetch().await.unwrap();
        assert_eq!(snapshot.accounts.len(), 1);
        assert_eq!(snapshot.accounts[0].rank_info.lp, 350);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/rankboard/data.json");
        let result = source.fetch().await;
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
    }

    #[tokio::test]
    async fn test_file_source_malformed_body() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<html>not json</html>").unwrap();

        let source = FileSource::new(file.path());
        let result = source.fetch().await;
        assert!(matches!(result, Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_build_source_prefers_url() {
        let config = SourceConfig {
            url: Some("http://localhost:5000/static/data.json".to_string()),
            path: Some("./static/data.json".to_string()),
            request_timeout_ms: 1000,
        };
        let source = build_source(&config).unwrap();
        assert_eq!(source.describe(), "http://localhost:5000/static/data.json");
    }

    #[test]
    fn test_build_source_requires_location() {
        let config = SourceConfig {
            url: None,
            path: None,
            request_timeout_ms: 1000,
        };
        assert!(build_source(&config).is_err());
    }
}
