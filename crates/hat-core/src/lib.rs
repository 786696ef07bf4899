//! h-at Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout h-at:
//! - Annotation records consumed by the template engine
//! - Extraction records and per-document results
//! - Common error types
//! - The annotation collaborator trait
//! - Configuration management

pub mod annotation;
pub mod config;

pub use annotation::{
    AnnotatedDocument, AnnotatedSentence, AnnotationError, CorefCluster, CorefMention,
    EntityLabel, EntityMention, LexicalRelations, SentenceAnnotation, Token, TokenAnnotation,
};
pub use config::{
    AnnotatorConfig, AppConfig, ConfigError, EngineConfig, LoggingConfig, SourceConfig,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for h-at operations
#[derive(Error, Debug)]
pub enum HatError {
    #[error("Annotation service error: {0}")]
    AnnotationService(String),

    #[error("Malformed annotation: {0}")]
    MalformedAnnotation(#[from] AnnotationError),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HatError>;

// ============================================================================
// Extraction Models
// ============================================================================

/// Template kinds the engine can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TemplateKind {
    /// PERSON was born on DATE in LOCATION
    Born,
    /// ORG acquired ORG on DATE
    Acquire,
    /// X is part of Y
    PartOf,
}

impl TemplateKind {
    /// All built-in kinds in registration order
    pub const ALL: [TemplateKind; 3] = [Self::Born, Self::Acquire, Self::PartOf];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Born => "BORN",
            Self::Acquire => "ACQUIRE",
            Self::PartOf => "PART_OF",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "BORN" => Ok(Self::Born),
            "ACQUIRE" => Ok(Self::Acquire),
            "PART_OF" | "PARTOF" => Ok(Self::PartOf),
            _ => Err(ConfigError::InvalidValue {
                key: "template".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Value of one template slot
///
/// `Unresolved` marks a role the rule looked for but could not fill;
/// it serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Resolved(String),
    Unresolved,
}

impl SlotValue {
    /// Resolved text, if any
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<&str>> for SlotValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(Self::Unresolved, |v| Self::Resolved(v.to_string()))
    }
}

impl From<&str> for SlotValue {
    fn from(value: &str) -> Self {
        Self::Resolved(value.to_string())
    }
}

/// Number of positional slots every record carries
pub const SLOT_COUNT: usize = 3;

/// One filled template instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtractionRecord {
    pub kind: TemplateKind,

    /// Sentence position within the document
    pub sentence_index: usize,

    /// Originating sentence text
    pub sentence: String,

    /// Positional arguments, slot 1 first
    pub slots: [SlotValue; SLOT_COUNT],
}

impl ExtractionRecord {
    /// Create a new record
    pub fn new(
        kind: TemplateKind,
        sentence_index: usize,
        sentence: impl Into<String>,
        slots: [SlotValue; SLOT_COUNT],
    ) -> Self {
        Self {
            kind,
            sentence_index,
            sentence: sentence.into(),
            slots,
        }
    }

    /// Slot by 1-based position
    pub fn slot(&self, position: usize) -> Option<&SlotValue> {
        position
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
    }
}

/// A sentence excluded from results because its annotation was malformed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceError {
    pub sentence_index: usize,
    pub message: String,
}

/// Extraction output for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Document title or file name
    pub title: String,

    /// Records in sentence, rule and fan-out order
    pub records: Vec<ExtractionRecord>,

    /// Sentences skipped for contract violations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<SentenceError>,
}

impl DocumentResult {
    /// Create an empty result
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one template kind
    pub fn records_of(&self, kind: TemplateKind) -> impl Iterator<Item = &ExtractionRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }
}

// ============================================================================
// Documents
// ============================================================================

/// Raw text of one document as delivered by a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub title: String,
    pub text: String,
}

impl RawDocument {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Linguistic annotation capability
///
/// Implementations wrap an external NLP service; the engine only sees the
/// resulting [`AnnotatedDocument`].
#[async_trait::async_trait]
pub trait Annotator: Send + Sync {
    /// Annotate the raw text of one document
    async fn annotate(&self, document: &RawDocument) -> Result<AnnotatedDocument>;

    /// Annotator name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
