//! Endpoint fetching against the platform's internal AJAX endpoints.

mod http;

pub use http::HttpFetcher;

use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Performs one authenticated GET and returns the raw body.
///
/// Implementations classify failures: 401/403 become
/// [`SchoologyError::Authentication`](crate::SchoologyError::Authentication),
/// every other failure becomes
/// [`SchoologyError::Transport`](crate::SchoologyError::Transport).
/// Nothing is retried.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, endpoint: &Url, cookie: &str) -> Result<String>;
}
