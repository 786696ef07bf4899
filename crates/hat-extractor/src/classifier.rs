//! Entity classification into template roles
//!
//! A role schema maps entity labels to the logical argument a template
//! needs. Classification partitions a sentence's mentions into ordered
//! per-role buckets.

use std::collections::BTreeMap;

use hat_core::{EntityLabel, EntityMention};

/// Logical template argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Subject,
    Organization,
    Date,
    Location,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Organization => "organization",
            Self::Date => "date",
            Self::Location => "location",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed mapping from entity label to role
#[derive(Debug, Clone, Copy)]
pub struct RoleSchema {
    entries: &'static [(EntityLabel, Role)],
}

impl RoleSchema {
    pub const fn new(entries: &'static [(EntityLabel, Role)]) -> Self {
        Self { entries }
    }

    /// Role for a label, if the template uses it
    pub fn role_of(&self, label: EntityLabel) -> Option<Role> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, role)| *role)
    }
}

/// Mentions grouped by role, each bucket in sentence order
#[derive(Debug, Clone, Default)]
pub struct RoleBuckets<'a> {
    buckets: BTreeMap<Role, Vec<&'a EntityMention>>,
}

impl<'a> RoleBuckets<'a> {
    /// Mentions assigned to `role`
    pub fn get(&self, role: Role) -> &[&'a EntityMention] {
        self.buckets.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, role: Role) -> usize {
        self.get(role).len()
    }

    pub fn first(&self, role: Role) -> Option<&'a EntityMention> {
        self.get(role).first().copied()
    }

    /// Bucket position and mention covering the token at `index`
    pub fn covering(&self, role: Role, index: usize) -> Option<(usize, &'a EntityMention)> {
        self.get(role)
            .iter()
            .enumerate()
            .find(|(_, m)| m.covers(index))
            .map(|(pos, m)| (pos, *m))
    }
}

/// Partition mentions by the schema; unmapped labels are dropped
pub fn classify<'a>(mentions: &'a [EntityMention], schema: &RoleSchema) -> RoleBuckets<'a> {
    let mut buckets: BTreeMap<Role, Vec<&'a EntityMention>> = BTreeMap::new();

    for mention in mentions {
        if let Some(role) = schema.role_of(mention.label) {
            buckets.entry(role).or_default().push(mention);
        }
    }

    RoleBuckets { buckets }
}
