//! Template rules
//!
//! One rule per template kind. Each rule detects its trigger lemmas,
//! checks role-bucket thresholds, then resolves arguments through the
//! dependency parse.

mod acquire;
mod born;
mod part_of;

pub use acquire::AcquireRule;
pub use born::BornRule;
pub use part_of::PartOfRule;

use hat_core::{EntityMention, Token};

use crate::classifier::{Role, RoleBuckets};
use crate::navigator::DependencyTree;

// Dependency relation labels (ClearNLP / spaCy English)
pub(crate) const NSUBJ: &str = "nsubj";
pub(crate) const NSUBJPASS: &str = "nsubjpass";
pub(crate) const DOBJ: &str = "dobj";
pub(crate) const AGENT: &str = "agent";
pub(crate) const POBJ: &str = "pobj";
pub(crate) const RELCL: &str = "relcl";

/// Grammatical voice of a trigger predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Voice {
    Active,
    Passive,
}

/// Voice and subject dependent of `trigger`, active taking precedence
pub(crate) fn subject_of<'a>(
    tree: &DependencyTree<'a>,
    trigger: &Token,
) -> Option<(Voice, &'a Token)> {
    if let Some(subject) = tree.child_with_dep(trigger, &[NSUBJ]) {
        return Some((Voice::Active, subject));
    }
    tree.child_with_dep(trigger, &[NSUBJPASS])
        .map(|subject| (Voice::Passive, subject))
}

/// Bucket mention covering `token` or one of its direct dependents
///
/// The dependent check catches appositions such as
/// "the mathematician Alan Turing".
pub(crate) fn mention_at<'a>(
    tree: &DependencyTree<'_>,
    buckets: &RoleBuckets<'a>,
    role: Role,
    token: &Token,
) -> Option<(usize, &'a EntityMention)> {
    buckets.covering(role, token.index).or_else(|| {
        tree.children(token)
            .find_map(|child| buckets.covering(role, child.index))
    })
}

/// Like [`mention_at`], falling back to the antecedent of a relative
/// clause when `token` is its pronoun ("Turing, who was born ...")
pub(crate) fn filler_at<'a>(
    tree: &DependencyTree<'_>,
    buckets: &RoleBuckets<'a>,
    role: Role,
    trigger: &Token,
    token: &Token,
) -> Option<(usize, &'a EntityMention)> {
    mention_at(tree, buckets, role, token).or_else(|| {
        if !trigger.dep.eq_ignore_ascii_case(RELCL) {
            return None;
        }
        tree.parent(trigger)
            .and_then(|antecedent| mention_at(tree, buckets, role, antecedent))
    })
}

/// First bucket mention attached to `trigger` within two levels,
/// falling back to the first mention in the bucket
pub(crate) fn attached_or_first<'a>(
    tree: &DependencyTree<'_>,
    buckets: &RoleBuckets<'a>,
    role: Role,
    trigger: &Token,
) -> Option<&'a EntityMention> {
    let nearby = tree.neighborhood(trigger);
    buckets
        .get(role)
        .iter()
        .find(|mention| nearby.iter().any(|t| mention.covers(t.index)))
        .copied()
        .or_else(|| buckets.first(role))
}
