//! `reqwest`-backed fetcher.

use super::Fetcher;
use crate::config::HttpSettings;
use crate::error::{Result, SchoologyError};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// HTTP fetcher sending the borrowed browser cookie verbatim.
///
/// The underlying client is built once and reused across requests.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher from HTTP settings.
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let timeout = match settings.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::with_timeout(timeout, &settings.user_agent)
    }

    /// Create a fetcher with an explicit timeout (`None` keeps the transport default).
    pub fn with_timeout(timeout: Option<Duration>, user_agent: &str) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(browser_headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| SchoologyError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

/// Headers the platform expects from its own XHR calls.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers
}

/// Map a non-success status onto the error taxonomy.
fn classify_status(status: StatusCode, endpoint: &Url) -> SchoologyError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SchoologyError::Authentication {
            status: status.as_u16(),
        },
        _ => SchoologyError::Transport {
            status: Some(status.as_u16()),
            message: format!("GET {} returned HTTP {}", endpoint, status),
        },
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    async fn fetch(&self, endpoint: &Url, cookie: &str) -> Result<String> {
        debug!("Fetching endpoint");

        let response = self
            .client
            .get(endpoint.clone())
            .header(header::COOKIE, cookie)
            .send()
            .await
            .map_err(|e| {
                warn!("Request failed: {}", e);
                if e.is_timeout() {
                    SchoologyError::network(format!("GET {} timed out", endpoint))
                } else {
                    SchoologyError::network(format!("GET {} failed: {}", endpoint, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Endpoint returned HTTP {}", status);
            return Err(classify_status(status, endpoint));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            SchoologyError::network(format!("Failed to read body from {}: {}", endpoint, e))
        })?;

        debug!("Received {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap as AxumHeaders, http::StatusCode as AxumStatus, routing::get, Router};

    const UA: &str = "schoology-mcp-test";

    async fn spawn_server() -> String {
        let app = Router::new()
            .route(
                "/courses",
                get(|headers: AxumHeaders| async move {
                    let cookie = headers
                        .get("cookie")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    let xhr = headers
                        .get("x-requested-with")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    format!("{}|{}", cookie, xhr)
                }),
            )
            .route("/expired", get(|| async { AxumStatus::UNAUTHORIZED }))
            .route("/forbidden", get(|| async { AxumStatus::FORBIDDEN }))
            .route(
                "/broken",
                get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn url(base: &str, path: &str) -> Url {
        Url::parse(&format!("{}{}", base, path)).unwrap()
    }

    #[tokio::test]
    async fn test_sends_cookie_verbatim() {
        let base = spawn_server().await;
        let fetcher = HttpFetcher::with_timeout(None, UA).unwrap();

        let cookie = "SESS9f=abc%3D; has_js=1";
        let body = fetcher.fetch(&url(&base, "/courses"), cookie).await.unwrap();
        assert_eq!(body, format!("{}|XMLHttpRequest", cookie));
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_are_authentication_errors() {
        let base = spawn_server().await;
        let fetcher = HttpFetcher::with_timeout(None, UA).unwrap();

        let err = fetcher.fetch(&url(&base, "/expired"), "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Authentication { status: 401 }));

        let err = fetcher.fetch(&url(&base, "/forbidden"), "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Authentication { status: 403 }));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let base = spawn_server().await;
        let fetcher = HttpFetcher::with_timeout(None, UA).unwrap();

        let err = fetcher.fetch(&url(&base, "/broken"), "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Transport { status: Some(500), .. }));

        let err = fetcher.fetch(&url(&base, "/missing"), "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Transport { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let base = spawn_server().await;
        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_millis(200)), UA).unwrap();

        let err = fetcher.fetch(&url(&base, "/slow"), "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Transport { status: None, .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_refused_connection_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::with_timeout(Some(Duration::from_secs(5)), UA).unwrap();
        let endpoint = Url::parse(&format!("http://{}/courses", addr)).unwrap();
        let err = fetcher.fetch(&endpoint, "a=1").await.unwrap_err();
        assert!(matches!(err, SchoologyError::Transport { status: None, .. }));
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let settings = HttpSettings {
            timeout_secs: 0,
            user_agent: UA.to_string(),
        };
        assert!(HttpFetcher::new(&settings).is_ok());
    }
}
