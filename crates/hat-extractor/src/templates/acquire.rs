//! ACQUIRE template: ORG acquired ORG on DATE
//!
//! One buyer may acquire several targets on different dates. Targets and
//! dates are paired by position; surplus entities on either side are
//! dropped rather than guessed.

use hat_core::{AnnotatedSentence, EntityLabel, EntityMention, ExtractionRecord, TemplateKind};

use super::{filler_at, mention_at, subject_of, Voice, AGENT, NSUBJ, POBJ};
use crate::classifier::{classify, Role, RoleBuckets, RoleSchema};
use crate::navigator::{DependencyTree, DEFAULT_MAX_DEPTH};
use crate::{ResolutionError, RuleOutcome, TemplateRule};

const TRIGGERS: &[&str] = &["acquire", "buy"];

const SCHEMA: RoleSchema = RoleSchema::new(&[
    (EntityLabel::Date, Role::Date),
    (EntityLabel::Org, Role::Organization),
]);

const MIN_DATES: usize = 1;
const MIN_ORGANIZATIONS: usize = 2;

/// Slots: (buyer, acquired, date)
#[derive(Debug, Clone)]
pub struct AcquireRule {
    max_depth: usize,
}

impl AcquireRule {
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

    /// Buyer's position in the organization bucket, and the mention
    fn resolve_buyer<'a>(
        &self,
        tree: &DependencyTree<'_>,
        buckets: &RoleBuckets<'a>,
        trigger_index: usize,
    ) -> Result<(usize, &'a EntityMention), ResolutionError> {
        let trigger = tree.find(tree.root(), trigger_index)?;

        match subject_of(tree, trigger) {
            // "A acquired B": the subject buys
            Some((Voice::Active, subject)) => {
                filler_at(tree, buckets, Role::Organization, trigger, subject).ok_or(
                    ResolutionError::Uncovered {
                        label: NSUBJ,
                        index: subject.index,
                        role: Role::Organization,
                    },
                )
            }
            // "B was acquired by A": the agent's object buys
            Some((Voice::Passive, _)) => {
                let agent = tree.child_with_dep(trigger, &[AGENT]).ok_or_else(|| {
                    ResolutionError::MissingDependent {
                        trigger: trigger.text.clone(),
                        label: AGENT,
                    }
                })?;
                let object = tree.child_with_dep(agent, &[POBJ]).ok_or_else(|| {
                    ResolutionError::MissingDependent {
                        trigger: trigger.text.clone(),
                        label: POBJ,
                    }
                })?;
                mention_at(tree, buckets, Role::Organization, object).ok_or(
                    ResolutionError::Uncovered {
                        label: POBJ,
                        index: object.index,
                        role: Role::Organization,
                    },
                )
            }
            None => Err(ResolutionError::MissingDependent {
                trigger: trigger.text.clone(),
                label: NSUBJ,
            }),
        }
    }
}

/// Pair every non-buyer organization with a date, both in sentence order
fn fan_out(
    sentence_index: usize,
    sentence: &AnnotatedSentence,
    buckets: &RoleBuckets<'_>,
    buyer_position: usize,
    buyer: &EntityMention,
) -> Vec<ExtractionRecord> {
    let targets = buckets
        .get(Role::Organization)
        .iter()
        .enumerate()
        .filter(|(position, _)| *position != buyer_position)
        .map(|(_, target)| *target);

    targets
        .zip(buckets.get(Role::Date).iter())
        .map(|(target, date)| {
            ExtractionRecord::new(
                TemplateKind::Acquire,
                sentence_index,
                sentence.text(),
                [
                    buyer.text.as_str().into(),
                    target.text.as_str().into(),
                    date.text.as_str().into(),
                ],
            )
        })
        .collect()
}

impl Default for AcquireRule {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRule for AcquireRule {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Acquire
    }

    fn apply(&self, sentence_index: usize, sentence: &AnnotatedSentence) -> RuleOutcome {
        let triggers: Vec<usize> = sentence.lemma_positions(TRIGGERS).collect();
        if triggers.is_empty() {
            return RuleOutcome::NoTrigger;
        }

        let buckets = classify(sentence.entities(), &SCHEMA);
        if buckets.count(Role::Date) < MIN_DATES
            || buckets.count(Role::Organization) < MIN_ORGANIZATIONS
        {
            return RuleOutcome::InsufficientEvidence;
        }

        let tree = DependencyTree::new(sentence).with_max_depth(self.max_depth);
        let mut failure = None;

        // The first trigger with a resolvable buyer consumes both buckets
        for trigger in triggers {
            match self.resolve_buyer(&tree, &buckets, trigger) {
                Ok((position, buyer)) => {
                    let records = fan_out(sentence_index, sentence, &buckets, position, buyer);
                    return RuleOutcome::from_attempts(records, None);
                }
                Err(err) => failure = Some(err),
            }
        }

        RuleOutcome::from_attempts(Vec::new(), failure)
    }
}
