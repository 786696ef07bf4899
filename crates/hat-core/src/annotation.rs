//! Annotation records
//!
//! Wire types produced by the external annotation service and the
//! validated, immutable per-sentence record the engine consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Entity Labels
// ============================================================================

/// Named entity categories emitted by the annotation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Person,
    Norp,
    Fac,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
    Date,
    Time,
    Percent,
    Money,
    Quantity,
    Ordinal,
    Cardinal,
    /// Any label outside the known set
    #[serde(other)]
    Other,
}

impl EntityLabel {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Norp => "NORP",
            Self::Fac => "FAC",
            Self::Org => "ORG",
            Self::Gpe => "GPE",
            Self::Loc => "LOC",
            Self::Product => "PRODUCT",
            Self::Event => "EVENT",
            Self::WorkOfArt => "WORK_OF_ART",
            Self::Law => "LAW",
            Self::Language => "LANGUAGE",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Percent => "PERCENT",
            Self::Money => "MONEY",
            Self::Quantity => "QUANTITY",
            Self::Ordinal => "ORDINAL",
            Self::Cardinal => "CARDINAL",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntityLabel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "PERSON" | "PER" => Self::Person,
            "NORP" => Self::Norp,
            "FAC" => Self::Fac,
            "ORG" => Self::Org,
            "GPE" => Self::Gpe,
            "LOC" => Self::Loc,
            "PRODUCT" => Self::Product,
            "EVENT" => Self::Event,
            "WORK_OF_ART" => Self::WorkOfArt,
            "LAW" => Self::Law,
            "LANGUAGE" => Self::Language,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "PERCENT" => Self::Percent,
            "MONEY" => Self::Money,
            "QUANTITY" => Self::Quantity,
            "ORDINAL" => Self::Ordinal,
            "CARDINAL" => Self::Cardinal,
            _ => Self::Other,
        })
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// A token as emitted by the annotation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    pub text: String,
    pub lemma: String,
    /// Coarse part of speech (UPOS)
    #[serde(default)]
    pub pos: String,
    /// Fine-grained tag (e.g. Penn Treebank)
    #[serde(default)]
    pub tag: String,
    /// Dependency relation to the head
    pub dep: String,
    /// Zero-based position within the sentence
    pub index: usize,
    /// Head token position; the root points at itself or is absent
    #[serde(default)]
    pub head: Option<usize>,
}

impl TokenAnnotation {
    /// Create a token with empty POS and tag
    pub fn new(
        index: usize,
        text: impl Into<String>,
        lemma: impl Into<String>,
        dep: impl Into<String>,
        head: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos: String::new(),
            tag: String::new(),
            dep: dep.into(),
            index,
            head,
        }
    }

    /// Set coarse POS and fine tag
    pub fn with_pos(mut self, pos: impl Into<String>, tag: impl Into<String>) -> Self {
        self.pos = pos.into();
        self.tag = tag.into();
        self
    }
}

/// A named entity mention covering tokens `start..end`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityMention {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

impl EntityMention {
    /// Create a new mention
    pub fn new(text: impl Into<String>, label: EntityLabel, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label,
            start,
            end,
        }
    }

    /// Whether the mention spans the token at `index`
    pub fn covers(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Lexical relation sets for one token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalRelations {
    #[serde(default)]
    pub hypernyms: Vec<String>,
    #[serde(default)]
    pub hyponyms: Vec<String>,
    #[serde(default)]
    pub meronyms: Vec<String>,
    #[serde(default)]
    pub holonyms: Vec<String>,
}

/// One sentence as emitted by the annotation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceAnnotation {
    pub text: String,
    pub tokens: Vec<TokenAnnotation>,
    #[serde(default)]
    pub entities: Vec<EntityMention>,
    /// Root token position; absent means the service produced no parse
    #[serde(default)]
    pub root: Option<usize>,
    /// Lexical relations keyed by token position
    #[serde(default)]
    pub lexical: BTreeMap<usize, LexicalRelations>,
}

impl SentenceAnnotation {
    /// Create a sentence annotation without lexical relations
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<TokenAnnotation>,
        entities: Vec<EntityMention>,
        root: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            tokens,
            entities,
            root,
            lexical: BTreeMap::new(),
        }
    }
}

/// A coreference mention: sentence position and token span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefMention {
    pub sentence: usize,
    pub start: usize,
    pub end: usize,
}

/// A cluster of mentions referring to the same real-world entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorefCluster {
    /// Representative mention text
    pub main: String,
    pub mentions: Vec<CorefMention>,
}

/// Annotation output for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub title: String,
    pub sentences: Vec<SentenceAnnotation>,
    #[serde(default)]
    pub coref_clusters: Vec<CorefCluster>,
}

impl AnnotatedDocument {
    /// Create a document without coreference information
    pub fn new(title: impl Into<String>, sentences: Vec<SentenceAnnotation>) -> Self {
        Self {
            title: title.into(),
            sentences,
            coref_clusters: Vec::new(),
        }
    }
}

// ============================================================================
// Validated Record
// ============================================================================

/// Contract violations by the annotation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("sentence has no tokens")]
    Empty,

    #[error("dependency root missing")]
    MissingRoot,

    #[error("root index {root} out of range for {len} tokens")]
    RootOutOfRange { root: usize, len: usize },

    #[error("root token {root} has foreign head {head}")]
    RootHasHead { root: usize, head: usize },

    #[error("token at position {position} carries index {index}")]
    IndexMismatch { position: usize, index: usize },

    #[error("token {index} has head {head} out of range for {len} tokens")]
    HeadOutOfRange { index: usize, head: usize, len: usize },

    #[error("non-root token {index} has no head")]
    MissingHead { index: usize },

    #[error("entity '{text}' spans {start}..{end} outside {len} tokens")]
    EntityOutOfRange {
        text: String,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// A token inside a validated sentence
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    pub index: usize,
    /// `None` for the root
    pub head: Option<usize>,
    /// Dependents in sentence order
    pub children: Vec<usize>,
}

/// Immutable per-sentence annotation record
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedSentence {
    text: String,
    tokens: Vec<Token>,
    entities: Vec<EntityMention>,
    root: usize,
    lexical: BTreeMap<usize, LexicalRelations>,
}

impl AnnotatedSentence {
    /// Validate a wire annotation and build the record
    pub fn from_annotation(annotation: &SentenceAnnotation) -> Result<Self, AnnotationError> {
        let len = annotation.tokens.len();
        if len == 0 {
            return Err(AnnotationError::Empty);
        }

        let root = annotation.root.ok_or(AnnotationError::MissingRoot)?;
        if root >= len {
            return Err(AnnotationError::RootOutOfRange { root, len });
        }

        let mut tokens = Vec::with_capacity(len);
        for (position, raw) in annotation.tokens.iter().enumerate() {
            if raw.index != position {
                return Err(AnnotationError::IndexMismatch {
                    position,
                    index: raw.index,
                });
            }

            let head = match raw.head {
                Some(head) if head >= len => {
                    return Err(AnnotationError::HeadOutOfRange {
                        index: position,
                        head,
                        len,
                    })
                }
                Some(head) if head == position => {
                    if position != root {
                        return Err(AnnotationError::MissingHead { index: position });
                    }
                    None
                }
                Some(head) => {
                    if position == root {
                        return Err(AnnotationError::RootHasHead { root, head });
                    }
                    Some(head)
                }
                None => {
                    if position != root {
                        return Err(AnnotationError::MissingHead { index: position });
                    }
                    None
                }
            };

            tokens.push(Token {
                text: raw.text.clone(),
                lemma: raw.lemma.clone(),
                pos: raw.pos.clone(),
                tag: raw.tag.clone(),
                dep: raw.dep.clone(),
                index: position,
                head,
                children: Vec::new(),
            });
        }

        for index in 0..len {
            if let Some(head) = tokens[index].head {
                tokens[head].children.push(index);
            }
        }

        for entity in &annotation.entities {
            if entity.start >= entity.end || entity.end > len {
                return Err(AnnotationError::EntityOutOfRange {
                    text: entity.text.clone(),
                    start: entity.start,
                    end: entity.end,
                    len,
                });
            }
        }

        Ok(Self {
            text: annotation.text.clone(),
            tokens,
            entities: annotation.entities.clone(),
            root,
            lexical: annotation.lexical.clone(),
        })
    }

    /// Sentence text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokens in sentence order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Named entity mentions in sentence order
    pub fn entities(&self) -> &[EntityMention] {
        &self.entities
    }

    /// Dependency root
    pub fn root(&self) -> &Token {
        &self.tokens[self.root]
    }

    /// Lexical relations for the token at `index`
    pub fn lexical(&self, index: usize) -> Option<&LexicalRelations> {
        self.lexical.get(&index)
    }

    /// Positions of tokens whose lowercased lemma is in `lemmas`
    pub fn lemma_positions<'a>(&'a self, lemmas: &'a [&str]) -> impl Iterator<Item = usize> + 'a {
        self.tokens
            .iter()
            .filter(move |t| lemmas.iter().any(|l| t.lemma.eq_ignore_ascii_case(l)))
            .map(|t| t.index)
    }
}
