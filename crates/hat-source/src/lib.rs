//! h-at Source - Document acquisition
//!
//! Supplies `(title, raw text)` pairs to the extraction pipeline from:
//! - Plain text and Markdown files
//! - Wikipedia articles (MediaWiki extracts API)
//!
//! Each source implements the `DocumentSource` trait. Failures are
//! reported per document so batch callers can skip and continue.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;

use hat_core::RawDocument;

pub mod wikipedia;

pub use wikipedia::WikipediaSource;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while acquiring a document
#[derive(Error, Debug)]
pub enum SourceError {
    /// File format is not supported
    #[error("Unsupported file format for {id}: {extension}")]
    UnsupportedFormat { id: String, extension: String },

    /// IO error while reading the file
    #[error("IO error reading {id}")]
    IoError {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote resource could not be fetched
    #[error("Failed to fetch {id}: {message}")]
    FetchError { id: String, message: String },

    /// Remote resource does not exist
    #[error("Document not found: {0}")]
    NotFound(String),
}

impl SourceError {
    /// Identifier of the document that failed
    pub fn document_id(&self) -> &str {
        match self {
            Self::UnsupportedFormat { id, .. }
            | Self::IoError { id, .. }
            | Self::FetchError { id, .. }
            | Self::NotFound(id) => id,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

// ============================================================================
// Source Trait
// ============================================================================

/// Trait for document sources
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch one document by identifier (path, title, ...)
    async fn fetch(&self, id: &str) -> Result<RawDocument>;

    /// Source name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// File Source
// ============================================================================

/// Supported file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Markdown,
    PlainText,
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Self::Markdown,
            "txt" | "text" => Self::PlainText,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from path; extensionless files are read as text
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::PlainText)
    }
}

/// Reads local text files; the title is the file stem
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative identifiers against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, id: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(id),
            None => PathBuf::from(id),
        }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, id: &str) -> Result<RawDocument> {
        let path = self.resolve(id);

        if FileType::from_path(&path) == FileType::Unknown {
            return Err(SourceError::UnsupportedFormat {
                id: id.to_string(),
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
            });
        }

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| SourceError::IoError {
                id: id.to_string(),
                source: e,
            })?;

        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(id)
            .to_string();

        tracing::debug!("Read {} bytes from {}", text.len(), path.display());
        Ok(RawDocument::new(title, text))
    }

    fn name(&self) -> &str {
        "file"
    }
}

// ============================================================================
// Text Cleanup
// ============================================================================

fn heading_pattern() -> Option<&'static Regex> {
    static HEADING: OnceLock<Option<Regex>> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"==.*?==+").ok()).as_ref()
}

/// Strip `== Heading ==` markers and flatten newlines to spaces
pub fn clean_wiki_text(text: &str) -> String {
    match heading_pattern() {
        Some(pattern) => pattern.replace_all(text, "").replace('\n', " "),
        None => text.replace('\n', " "),
    }
}

// ============================================================================
// Tests
// ============================================================================
