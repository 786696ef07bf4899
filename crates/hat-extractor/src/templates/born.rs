//! BORN template: PERSON was born on DATE in LOCATION

use hat_core::{
    AnnotatedSentence, EntityLabel, ExtractionRecord, SlotValue, TemplateKind, SLOT_COUNT,
};

use super::{attached_or_first, filler_at, subject_of, Voice, DOBJ, NSUBJPASS};
use crate::classifier::{classify, Role, RoleBuckets, RoleSchema};
use crate::navigator::{DependencyTree, DEFAULT_MAX_DEPTH};
use crate::{ResolutionError, RuleOutcome, TemplateRule};

const TRIGGERS: &[&str] = &["bear"];

const SCHEMA: RoleSchema = RoleSchema::new(&[
    (EntityLabel::Date, Role::Date),
    (EntityLabel::Person, Role::Subject),
    (EntityLabel::Org, Role::Subject),
    (EntityLabel::Loc, Role::Location),
    (EntityLabel::Gpe, Role::Location),
]);

/// Slots: (subject, date, location)
#[derive(Debug, Clone)]
pub struct BornRule {
    max_depth: usize,
}

impl BornRule {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the tree search ceiling
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn resolve(
        &self,
        tree: &DependencyTree<'_>,
        buckets: &RoleBuckets<'_>,
        trigger_index: usize,
    ) -> Result<[SlotValue; SLOT_COUNT], ResolutionError> {
        let trigger = tree.find(tree.root(), trigger_index)?;

        // Passive "X was born": X is the nsubjpass. Active "Y bore X": X is the object.
        let labeled = match subject_of(tree, trigger) {
            Some((Voice::Passive, token)) => Some((NSUBJPASS, token)),
            Some((Voice::Active, _)) => {
                let object = tree.child_with_dep(trigger, &[DOBJ]).ok_or_else(|| {
                    ResolutionError::MissingDependent {
                        trigger: trigger.text.clone(),
                        label: DOBJ,
                    }
                })?;
                Some((DOBJ, object))
            }
            None => None,
        };

        let subject = match labeled {
            Some((label, token)) => filler_at(tree, buckets, Role::Subject, trigger, token)
                .map(|(_, mention)| mention)
                .ok_or(ResolutionError::Uncovered {
                    label,
                    index: token.index,
                    role: Role::Subject,
                })?,
            // Reduced clauses ("Born in London, ...") carry no subject dependent
            None => buckets
                .first(Role::Subject)
                .ok_or_else(|| ResolutionError::MissingDependent {
                    trigger: trigger.text.clone(),
                    label: NSUBJPASS,
                })?,
        };

        let date = attached_or_first(tree, buckets, Role::Date, trigger);
        let location = attached_or_first(tree, buckets, Role::Location, trigger);

        Ok([
            subject.text.as_str().into(),
            date.map(|m| m.text.as_str()).into(),
            location.map(|m| m.text.as_str()).into(),
        ])
    }
}

impl Default for BornRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRule for BornRule {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Born
    }

    fn apply(&self, sentence_index: usize, sentence: &AnnotatedSentence) -> RuleOutcome {
        let triggers: Vec<usize> = sentence.lemma_positions(TRIGGERS).collect();
        if triggers.is_empty() {
            return RuleOutcome::NoTrigger;
        }

        let buckets = classify(sentence.entities(), &SCHEMA);
        if buckets.count(Role::Subject) < 1 {
            return RuleOutcome::InsufficientEvidence;
        }

        let tree = DependencyTree::new(sentence).with_max_depth(self.max_depth);
        let mut records: Vec<ExtractionRecord> = Vec::new();
        let mut failure = None;

        // Each trigger occurrence is its own clause
        for trigger in triggers {
            match self.resolve(&tree, &buckets, trigger) {
                Ok(slots) => {
                    let record =
                        ExtractionRecord::new(self.kind(), sentence_index, sentence.text(), slots);
                    if !records.contains(&record) {
                        records.push(record);
                    }
                }
                Err(err) => failure = Some(err),
            }
        }

        RuleOutcome::from_attempts(records, failure)
    }
}
