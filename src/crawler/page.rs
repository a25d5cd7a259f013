//! The page fetch/parse port
//!
//! Engines only see [`PageParser`]: given a URL, it returns the raw words and
//! outbound links of that page. Failures never cross this boundary; a page
//! that cannot be fetched or parsed is simply empty.

use crate::crawler::fetcher::{build_http_client, fetch_document, FetchError};
use crate::crawler::parser::parse_html;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Raw content extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// Words in document order, not yet normalized
    pub words: Vec<String>,

    /// Absolute URLs of outbound links, duplicates included
    pub links: Vec<String>,
}

/// Fetches and parses pages for the crawl engines
#[async_trait]
pub trait PageParser: Send + Sync {
    /// Returns the words and links of `url`, or an empty page on any failure
    async fn parse(&self, url: &str) -> PageContent;
}

/// [`PageParser`] for remote (`http`/`https`) and local (`file`) HTML pages
#[derive(Debug, Clone)]
pub struct HtmlPageParser {
    client: Client,
}

impl HtmlPageParser {
    /// Creates a parser whose remote fetches give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(timeout)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn try_parse(&self, url: &str) -> Result<PageContent, FetchError> {
        let base_url = Url::parse(url)?;
        let html = fetch_document(&self.client, &base_url).await?;
        Ok(parse_html(&html, &base_url))
    }
}

#[async_trait]
impl PageParser for HtmlPageParser {
    async fn parse(&self, url: &str) -> PageContent {
        match self.try_parse(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("Treating {} as an empty page: {}", url, e);
                PageContent::default()
            }
        }
    }
}
