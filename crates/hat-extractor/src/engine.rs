//! Template engine
//!
//! Applies every registered rule to every sentence of an annotated
//! document and concatenates the records in sentence order, then rule
//! order within a sentence.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use hat_core::{
    AnnotatedDocument, AnnotatedSentence, AnnotationError, DocumentResult, EngineConfig,
    ExtractionRecord, SentenceAnnotation, SentenceError, TemplateKind,
};

use crate::templates::{AcquireRule, BornRule, PartOfRule};
use crate::{RuleOutcome, TemplateRule};

/// Rule registry and dispatcher
pub struct TemplateEngine {
    rules: Vec<Box<dyn TemplateRule>>,
    parallel: bool,
}

impl TemplateEngine {
    /// Engine with no rules; every document yields an empty result
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            parallel: true,
        }
    }

    /// BORN, ACQUIRE and PART-OF, in that order
    pub fn with_default_templates() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Register the built-in rules named in the config
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut engine = Self::new().with_parallel(config.parallel);

        for kind in &config.templates {
            let rule: Option<Box<dyn TemplateRule>> = match kind {
                TemplateKind::Born => {
                    Some(Box::new(BornRule::new().with_max_depth(config.max_tree_depth)))
                }
                TemplateKind::Acquire => {
                    Some(Box::new(AcquireRule::new().with_max_depth(config.max_tree_depth)))
                }
                TemplateKind::PartOf => Some(Box::new(PartOfRule::new())),
                _ => None,
            };

            match rule {
                Some(rule) => {
                    engine.register(rule);
                }
                None => warn!(template = %kind, "No built-in rule for template, skipping"),
            }
        }

        engine
    }

    /// Append a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: Box<dyn TemplateRule>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Toggle sentence-level parallelism
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Registered template kinds in dispatch order
    pub fn kinds(&self) -> Vec<TemplateKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Run every rule over every sentence
    ///
    /// Malformed sentences are skipped and reported in
    /// [`DocumentResult::errors`]; the rest of the document is processed.
    pub fn run(&self, document: &AnnotatedDocument) -> DocumentResult {
        let outputs: Vec<Result<Vec<ExtractionRecord>, AnnotationError>> = if self.parallel {
            document
                .sentences
                .par_iter()
                .enumerate()
                .map(|(index, sentence)| self.run_sentence(index, sentence))
                .collect()
        } else {
            document
                .sentences
                .iter()
                .enumerate()
                .map(|(index, sentence)| self.run_sentence(index, sentence))
                .collect()
        };

        let mut result = DocumentResult::new(&document.title);
        for (index, output) in outputs.into_iter().enumerate() {
            match output {
                Ok(records) => result.records.extend(records),
                Err(e) => {
                    warn!(
                        document = %document.title,
                        sentence = index,
                        error = %e,
                        "Skipping malformed sentence"
                    );
                    result.errors.push(SentenceError {
                        sentence_index: index,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            document = %document.title,
            sentences = document.sentences.len(),
            records = result.records.len(),
            skipped = result.errors.len(),
            "Extraction complete"
        );

        result
    }

    /// Validate one sentence and apply every rule to it
    pub fn run_sentence(
        &self,
        index: usize,
        annotation: &SentenceAnnotation,
    ) -> Result<Vec<ExtractionRecord>, AnnotationError> {
        let sentence = AnnotatedSentence::from_annotation(annotation)?;
        let mut records = Vec::new();

        for rule in &self.rules {
            match rule.apply(index, &sentence) {
                RuleOutcome::Fired(fired) => records.extend(fired),
                RuleOutcome::Unresolved(reason) => {
                    debug!(
                        template = %rule.kind(),
                        sentence = index,
                        reason = %reason,
                        "Template triggered but unresolved"
                    );
                }
                RuleOutcome::InsufficientEvidence => {
                    debug!(
                        template = %rule.kind(),
                        sentence = index,
                        "Template triggered without enough entities"
                    );
                }
                RuleOutcome::NoTrigger => {}
            }
        }

        Ok(records)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::with_default_templates()
    }
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("rules", &self.kinds())
            .field("parallel", &self.parallel)
            .finish()
    }
}
