//! Wikipedia article source
//!
//! Fetches plain-text article extracts through the MediaWiki API and
//! strips section headings so the text reads as continuous prose.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use hat_core::{RawDocument, SourceConfig};

use crate::{clean_wiki_text, DocumentSource, Result, SourceError};

/// MediaWiki extracts client
pub struct WikipediaSource {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    extract: Option<String>,
}

impl WikipediaSource {
    /// Create a client for the given API endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Create from config
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SourceError::FetchError {
                id: config.wikipedia_api_url.clone(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: config.wikipedia_api_url.clone(),
        })
    }

    /// Turn an API response body into a cleaned document
    fn parse_response(title: &str, body: &str) -> Result<RawDocument> {
        let response: QueryResponse =
            serde_json::from_str(body).map_err(|e| SourceError::FetchError {
                id: title.to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        let page = response
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| SourceError::NotFound(title.to_string()))?;

        if page.missing {
            return Err(SourceError::NotFound(title.to_string()));
        }

        let extract = page
            .extract
            .ok_or_else(|| SourceError::NotFound(title.to_string()))?;

        Ok(RawDocument::new(page.title, clean_wiki_text(&extract)))
    }
}

#[async_trait]
impl DocumentSource for WikipediaSource {
    async fn fetch(&self, id: &str) -> Result<RawDocument> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", id),
            ])
            .send()
            .await
            .map_err(|e| SourceError::FetchError {
                id: id.to_string(),
                message: format!("Request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(SourceError::FetchError {
                id: id.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let body = response.text().await.map_err(|e| SourceError::FetchError {
            id: id.to_string(),
            message: format!("Failed to read body: {e}"),
        })?;

        let document = Self::parse_response(id, &body)?;
        tracing::info!(
            "Fetched Wikipedia article '{}' ({} chars)",
            document.title,
            document.text.len()
        );
        Ok(document)
    }

    fn name(&self) -> &str {
        "wikipedia"
    }
}
