//! Document fetcher
//!
//! This module loads the raw HTML behind a URL:
//! - `http`/`https` URLs with a shared `reqwest` client
//! - `file` URLs straight from disk
//!
//! Every failure is reported as a [`FetchError`]; callers decide how to
//! degrade.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a document could not be loaded
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Malformed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML, got {content_type}")]
    ContentMismatch { content_type: String },

    #[error("Not a local file path: {0}")]
    NotAFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the HTTP client used for remote pages
///
/// # Arguments
///
/// * `timeout` - Per-request timeout; the crawl timeout bounds any single fetch
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("word-ripple/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the document behind `url`
///
/// | Scheme | Action |
/// |--------|--------|
/// | `http`, `https` | GET; non-2xx or non-HTML content type is an error |
/// | `file` | Read the file as UTF-8 |
/// | other | [`FetchError::UnsupportedScheme`] |
pub async fn fetch_document(client: &Client, url: &Url) -> Result<String, FetchError> {
    match url.scheme() {
        "http" | "https" => fetch_remote(client, url).await,
        "file" => fetch_local(url).await,
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

async fn fetch_remote(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    // A missing Content-Type is given the benefit of the doubt
    if let Some(content_type) = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !content_type.contains("html") {
            return Err(FetchError::ContentMismatch {
                content_type: content_type.to_string(),
            });
        }
    }

    Ok(response.text().await?)
}

async fn fetch_local(url: &Url) -> Result<String, FetchError> {
    let path = url
        .to_file_path()
        .map_err(|_| FetchError::NotAFile(url.to_string()))?;
    Ok(tokio::fs::read_to_string(path).await?)
}
