//! Document pipeline
//!
//! Acquire → annotate → extract. Each document fails independently; a
//! batch returns one result per identifier in input order.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{info, warn};

use hat_core::{Annotator, DocumentResult, HatError};
use hat_source::{DocumentSource, SourceError};

use crate::engine::TemplateEngine;

/// Per-document pipeline failures
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Annotation failed for {id}: {source}")]
    Annotation {
        id: String,
        #[source]
        source: HatError,
    },

    #[error("Extraction task failed for {id}: {message}")]
    Engine { id: String, message: String },
}

impl PipelineError {
    /// Identifier of the document that failed
    pub fn document_id(&self) -> &str {
        match self {
            Self::Source(e) => e.document_id(),
            Self::Annotation { id, .. } | Self::Engine { id, .. } => id,
        }
    }
}

/// Source, annotator and engine wired together
#[derive(Clone)]
pub struct Pipeline {
    source: Arc<dyn DocumentSource>,
    annotator: Arc<dyn Annotator>,
    engine: Arc<TemplateEngine>,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        annotator: Arc<dyn Annotator>,
        engine: Arc<TemplateEngine>,
    ) -> Self {
        Self {
            source,
            annotator,
            engine,
        }
    }

    /// Fetch, annotate and extract one document
    pub async fn process(&self, id: &str) -> Result<DocumentResult, PipelineError> {
        let raw = self.source.fetch(id).await?;
        info!(
            id = %id,
            source = self.source.name(),
            bytes = raw.text.len(),
            "Fetched document"
        );

        let annotated = self
            .annotator
            .annotate(&raw)
            .await
            .map_err(|source| PipelineError::Annotation {
                id: id.to_string(),
                source,
            })?;

        // Rule evaluation is CPU-bound
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || engine.run(&annotated))
            .await
            .map_err(|e| PipelineError::Engine {
                id: id.to_string(),
                message: e.to_string(),
            })
    }

    /// Process documents with at most `concurrency` in flight
    ///
    /// Output order matches `ids`; failures are logged and returned in place.
    pub async fn process_batch<I, S>(
        &self,
        ids: I,
        concurrency: usize,
    ) -> Vec<(String, Result<DocumentResult, PipelineError>)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let total = ids.len();

        let results: Vec<(String, Result<DocumentResult, PipelineError>)> = stream::iter(ids)
            .map(|id| async move {
                let result = self.process(&id).await;
                if let Err(e) = &result {
                    warn!(id = %id, error = %e, "Skipping document");
                }
                (id, result)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(total, failed, "Batch complete");

        results
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source.name())
            .field("annotator", &self.annotator.name())
            .field("engine", &self.engine)
            .finish()
    }
}
