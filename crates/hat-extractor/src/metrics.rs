//! Quality Metrics module
//!
//! Scores extracted records against a gold standard. Records match on
//! template kind, sentence index and slot values; the sentence text is
//! not compared.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use hat_core::{DocumentResult, ExtractionRecord, SlotValue, TemplateKind, SLOT_COUNT};

// ============================================================================
// Record Metrics
// ============================================================================

/// Confusion counts for one set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetrics {
    /// Predicted records present in the gold standard
    pub true_positives: usize,
    /// Predicted records absent from the gold standard
    pub false_positives: usize,
    /// Gold records that were not predicted
    pub false_negatives: usize,
}

impl RecordMetrics {
    /// Calculate precision (TP / (TP + FP))
    pub fn precision(&self) -> f32 {
        if self.true_positives + self.false_positives == 0 {
            0.0
        } else {
            self.true_positives as f32 / (self.true_positives + self.false_positives) as f32
        }
    }

    /// Calculate recall (TP / (TP + FN))
    pub fn recall(&self) -> f32 {
        if self.true_positives + self.false_negatives == 0 {
            0.0
        } else {
            self.true_positives as f32 / (self.true_positives + self.false_negatives) as f32
        }
    }

    /// Calculate F1 score (2 * P * R / (P + R))
    pub fn f1_score(&self) -> f32 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    fn add(&mut self, other: &RecordMetrics) {
        self.true_positives += other.true_positives;
        self.false_positives += other.false_positives;
        self.false_negatives += other.false_negatives;
    }
}

// ============================================================================
// Evaluation Report
// ============================================================================

/// Overall and per-template scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub overall: RecordMetrics,
    pub per_template: BTreeMap<TemplateKind, RecordMetrics>,
}

impl EvaluationReport {
    /// Scores for one template kind, zero if none were seen
    pub fn template(&self, kind: TemplateKind) -> RecordMetrics {
        self.per_template.get(&kind).copied().unwrap_or_default()
    }

    fn merge(&mut self, other: &EvaluationReport) {
        self.overall.add(&other.overall);
        for (kind, metrics) in &other.per_template {
            self.per_template.entry(*kind).or_default().add(metrics);
        }
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "overall: P={:.3} R={:.3} F1={:.3} (tp={} fp={} fn={})",
            self.overall.precision(),
            self.overall.recall(),
            self.overall.f1_score(),
            self.overall.true_positives,
            self.overall.false_positives,
            self.overall.false_negatives,
        )];
        for (kind, m) in &self.per_template {
            lines.push(format!(
                "{kind}: P={:.3} R={:.3} F1={:.3}",
                m.precision(),
                m.recall(),
                m.f1_score()
            ));
        }
        lines.join("\n")
    }
}

/// Match key: everything but the sentence text
type RecordKey<'a> = (TemplateKind, usize, &'a [SlotValue; SLOT_COUNT]);

fn key(record: &ExtractionRecord) -> RecordKey<'_> {
    (record.kind, record.sentence_index, &record.slots)
}

/// Score predicted records against gold records
///
/// Duplicates count: two identical predictions need two identical gold
/// records to both be true positives.
pub fn evaluate(predicted: &[ExtractionRecord], gold: &[ExtractionRecord]) -> EvaluationReport {
    let mut remaining: HashMap<RecordKey<'_>, usize> = HashMap::new();
    for record in gold {
        *remaining.entry(key(record)).or_insert(0) += 1;
    }

    let mut report = EvaluationReport::default();

    for record in predicted {
        let metrics = report.per_template.entry(record.kind).or_default();
        match remaining.get_mut(&key(record)) {
            Some(count) if *count > 0 => {
                *count -= 1;
                metrics.true_positives += 1;
            }
            _ => metrics.false_positives += 1,
        }
    }

    for ((kind, _, _), count) in remaining {
        report.per_template.entry(kind).or_default().false_negatives += count;
    }

    let per_template: Vec<RecordMetrics> = report.per_template.values().copied().collect();
    for metrics in &per_template {
        report.overall.add(metrics);
    }

    report
}

/// Score documents pairwise by title
///
/// A document missing from either side contributes only false
/// positives or false negatives.
pub fn evaluate_documents(
    predicted: &[DocumentResult],
    gold: &[DocumentResult],
) -> EvaluationReport {
    let gold_by_title: HashMap<&str, &DocumentResult> =
        gold.iter().map(|d| (d.title.as_str(), d)).collect();

    let mut report = EvaluationReport::default();
    for doc in predicted {
        let gold_records = gold_by_title
            .get(doc.title.as_str())
            .map(|g| g.records.as_slice())
            .unwrap_or(&[]);
        report.merge(&evaluate(&doc.records, gold_records));
    }

    for doc in gold {
        if !predicted.iter().any(|p| p.title == doc.title) {
            report.merge(&evaluate(&[], &doc.records));
        }
    }

    report
}
