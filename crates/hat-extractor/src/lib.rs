//! h-at Extractor - Template-filling engine
//!
//! Fills fact templates (BORN, ACQUIRE, PART-OF) from per-sentence
//! linguistic annotations by walking dependency parses and classifying
//! named entities into template roles.

use thiserror::Error;

use hat_core::{AnnotatedSentence, ExtractionRecord, TemplateKind};

pub mod annotator;
pub mod classifier;
pub mod engine;
pub mod metrics;
pub mod navigator;
pub mod pipeline;
pub mod templates;

#[cfg(test)]
mod fixtures;

pub use annotator::{HttpAnnotator, PrecomputedAnnotator};
pub use classifier::{classify, Role, RoleBuckets, RoleSchema};
pub use engine::TemplateEngine;
pub use metrics::{evaluate, evaluate_documents, EvaluationReport, RecordMetrics};
pub use navigator::{DependencyTree, NavigationError};
pub use pipeline::{Pipeline, PipelineError};
pub use templates::{AcquireRule, BornRule, PartOfRule};

/// Structural failures while resolving template roles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("trigger '{trigger}' has no {label} dependent")]
    MissingDependent {
        trigger: String,
        label: &'static str,
    },

    #[error("{label} token {index} is not covered by a {role} mention")]
    Uncovered {
        label: &'static str,
        index: usize,
        role: Role,
    },

    #[error("none of {pairs} adjacent mention pairs is linked")]
    Unlinked { pairs: usize },
}

/// Result of applying one rule to one sentence
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// No trigger lemma in the sentence
    NoTrigger,
    /// Trigger present but role buckets below the template's threshold
    InsufficientEvidence,
    /// Evidence present but the parse did not yield the expected roles
    Unresolved(ResolutionError),
    /// One or more records
    Fired(Vec<ExtractionRecord>),
}

impl RuleOutcome {
    /// Fired if any records were built, otherwise the last failure
    pub(crate) fn from_attempts(
        records: Vec<ExtractionRecord>,
        failure: Option<ResolutionError>,
    ) -> Self {
        match (records.is_empty(), failure) {
            (false, _) => Self::Fired(records),
            (true, Some(err)) => Self::Unresolved(err),
            (true, None) => Self::InsufficientEvidence,
        }
    }

    pub fn fired(&self) -> bool {
        matches!(self, Self::Fired(_))
    }

    /// Emitted records, empty unless fired
    pub fn records(&self) -> &[ExtractionRecord] {
        match self {
            Self::Fired(records) => records,
            _ => &[],
        }
    }

    pub fn into_records(self) -> Vec<ExtractionRecord> {
        match self {
            Self::Fired(records) => records,
            _ => Vec::new(),
        }
    }
}

/// Trait for template rules
///
/// A rule reads one sentence and never fails: missing evidence and
/// unresolvable structure are reported through [`RuleOutcome`].
pub trait TemplateRule: Send + Sync {
    /// Template this rule fills
    fn kind(&self) -> TemplateKind;

    /// Apply the rule to the sentence at `sentence_index`
    fn apply(&self, sentence_index: usize, sentence: &AnnotatedSentence) -> RuleOutcome;
}
