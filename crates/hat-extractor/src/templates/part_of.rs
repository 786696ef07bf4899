//! PART-OF template: X is part of Y
//!
//! No syntactic resolution: neighbouring mentions of the same role are
//! paired when a trigger word, and no other entity, sits between them.

use hat_core::{
    AnnotatedSentence, EntityLabel, EntityMention, ExtractionRecord, SlotValue, TemplateKind,
};

use crate::classifier::{classify, Role, RoleSchema};
use crate::{ResolutionError, RuleOutcome, TemplateRule};

const TRIGGERS: &[&str] = &["in", "be", "part"];

const SCHEMA: RoleSchema = RoleSchema::new(&[
    (EntityLabel::Loc, Role::Location),
    (EntityLabel::Gpe, Role::Location),
    (EntityLabel::Org, Role::Organization),
]);

const MIN_PAIRED: usize = 2;

/// Slots: (part, whole, unresolved)
#[derive(Debug, Clone, Default)]
pub struct PartOfRule;

impl PartOfRule {
    pub fn new() -> Self {
        Self
    }

    /// Whether tokens between `part` and `whole` hold a trigger and no entity
    fn linked(sentence: &AnnotatedSentence, part: &EntityMention, whole: &EntityMention) -> bool {
        let gap = part.end..whole.start;
        if gap.is_empty() {
            return false;
        }

        let has_trigger = sentence.tokens()[gap.clone()]
            .iter()
            .any(|t| TRIGGERS.iter().any(|l| t.lemma.eq_ignore_ascii_case(l)));
        let has_entity = sentence
            .entities()
            .iter()
            .any(|e| gap.contains(&e.start));

        has_trigger && !has_entity
    }
}

impl TemplateRule for PartOfRule {
    fn kind(&self) -> TemplateKind {
        TemplateKind::PartOf
    }

    fn apply(&self, sentence_index: usize, sentence: &AnnotatedSentence) -> RuleOutcome {
        if sentence.lemma_positions(TRIGGERS).next().is_none() {
            return RuleOutcome::NoTrigger;
        }

        let buckets = classify(sentence.entities(), &SCHEMA);
        let roles: Vec<Role> = [Role::Location, Role::Organization]
            .into_iter()
            .filter(|role| buckets.count(*role) >= MIN_PAIRED)
            .collect();
        if roles.is_empty() {
            return RuleOutcome::InsufficientEvidence;
        }

        let pairs: Vec<&[&EntityMention]> = roles
            .iter()
            .flat_map(|role| buckets.get(*role).windows(2))
            .collect();

        let records: Vec<ExtractionRecord> = pairs
            .iter()
            .filter(|pair| Self::linked(sentence, pair[0], pair[1]))
            .map(|pair| {
                ExtractionRecord::new(
                    self.kind(),
                    sentence_index,
                    sentence.text(),
                    [
                        pair[0].text.as_str().into(),
                        pair[1].text.as_str().into(),
                        SlotValue::Unresolved,
                    ],
                )
            })
            .collect();

        // Threshold met but no pair passed the gap test
        let failure = ResolutionError::Unlinked { pairs: pairs.len() };
        RuleOutcome::from_attempts(records, Some(failure))
    }
}
