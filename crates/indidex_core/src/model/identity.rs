//! Entity identity rules.
//!
//! # Responsibility
//! - Define what makes two persons (or two projects) "the same" entity.
//! - Keep identity separate from full value equality.
//!
//! # Invariants
//! - Identity keys are compared exactly (case-sensitive, no trimming).
//! - Two entities with equal keys are the same entity even when other fields differ.

use std::fmt::{Display, Formatter};

/// Entity family an identity key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    Project,
}

impl EntityKind {
    /// Stable lowercase label used in messages and log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Project => "project",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity contract shared by every entity stored in a unique collection.
pub trait Identified {
    /// Entity family, used for error reporting.
    const KIND: EntityKind;

    /// Returns the identity key of this entity.
    fn identity_key(&self) -> &str;

    /// Returns whether `other` denotes the same real-world entity.
    ///
    /// This is a weaker notion than `PartialEq`, which compares every field.
    fn is_same(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}
