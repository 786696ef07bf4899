//! Annotation collaborators
//!
//! Adapters that turn raw document text into annotated documents:
//! an HTTP client for a running annotation service and an in-memory
//! store of precomputed annotations.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hat_core::{
    AnnotatedDocument, Annotator, AnnotatorConfig, CorefCluster, HatError, RawDocument, Result,
    SentenceAnnotation,
};

// ============================================================================
// HTTP Annotator
// ============================================================================

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    title: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    sentences: Vec<SentenceAnnotation>,
    #[serde(default)]
    coref_clusters: Vec<CorefCluster>,
}

/// Client for an annotation service speaking the JSON sentence contract
pub struct HttpAnnotator {
    client: Client,
    url: String,
}

impl HttpAnnotator {
    /// Create a client for `url` with the default timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(AnnotatorConfig::default().timeout_secs))
    }

    /// Create from config
    pub fn from_config(config: &AnnotatorConfig) -> Result<Self> {
        Self::with_timeout(&config.url, Duration::from_secs(config.timeout_secs))
    }

    fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HatError::AnnotationService(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Service endpoint
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, document: &RawDocument) -> Result<AnnotatedDocument> {
        let request = AnnotateRequest {
            title: &document.title,
            text: &document.text,
        };

        debug!(document = %document.title, url = %self.url, "Requesting annotation");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| HatError::AnnotationService(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(HatError::AnnotationService(format!(
                "Service returned {status}: {error_text}"
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| HatError::AnnotationService(format!("Failed to parse response: {e}")))?;

        Ok(into_document(&document.title, body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn into_document(title: &str, body: AnnotateResponse) -> AnnotatedDocument {
    AnnotatedDocument {
        title: title.to_string(),
        sentences: body.sentences,
        coref_clusters: body.coref_clusters,
    }
}

// ============================================================================
// Precomputed Annotator
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<AnnotatedDocument>),
    One(AnnotatedDocument),
}

/// Serves annotations computed ahead of time, keyed by document title
#[derive(Debug, Clone, Default)]
pub struct PrecomputedAnnotator {
    documents: HashMap<String, AnnotatedDocument>,
}

impl PrecomputedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index documents by title; later duplicates replace earlier ones
    pub fn from_documents(documents: impl IntoIterator<Item = AnnotatedDocument>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.title.clone(), doc))
            .collect();
        Self { documents }
    }

    /// Load a JSON file holding one annotated document or an array of them
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HatError::AnnotationService(format!("Failed to read {}: {e}", path.display()))
        })?;
        let annotator = Self::from_json(&content).map_err(|e| {
            HatError::AnnotationService(format!("Failed to parse {}: {e}", path.display()))
        })?;

        info!(
            path = %path.display(),
            documents = annotator.len(),
            "Loaded precomputed annotations"
        );
        Ok(annotator)
    }

    /// Parse one annotated document or an array of them
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let documents = match serde_json::from_str(content)? {
            OneOrMany::Many(documents) => documents,
            OneOrMany::One(document) => vec![document],
        };
        Ok(Self::from_documents(documents))
    }

    /// Merge another store into this one
    pub fn extend(&mut self, other: PrecomputedAnnotator) {
        self.documents.extend(other.documents);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored titles, sorted
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }

    /// Stored annotation for `title`
    pub fn get(&self, title: &str) -> Option<&AnnotatedDocument> {
        self.documents.get(title)
    }
}

#[async_trait]
impl Annotator for PrecomputedAnnotator {
    async fn annotate(&self, document: &RawDocument) -> Result<AnnotatedDocument> {
        self.documents
            .get(&document.title)
            .cloned()
            .ok_or_else(|| HatError::NotFound(document.title.clone()))
    }

    fn name(&self) -> &str {
        "precomputed"
    }
}
