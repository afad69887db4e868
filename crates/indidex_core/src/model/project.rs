//! Project domain model and its embedded membership set.
//!
//! # Responsibility
//! - Define the project record and the person-membership relation it carries.
//! - Derive new project values for every membership change.
//!
//! # Invariants
//! - `name` is the identity key.
//! - `members` holds person identity keys and is never empty.
//! - Membership changes return new values; a stored project is never mutated.

use crate::model::identity::{EntityKind, Identified};
use crate::model::priority::Priority;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Membership rule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// The operation would leave `project` without members.
    WouldBeEmpty { project: String },
    /// `person` is not currently a member of `project`.
    NotAMember { person: String, project: String },
}

impl Display for MembershipError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WouldBeEmpty { project } => {
                write!(f, "project `{project}` cannot have no members")
            }
            Self::NotAMember { person, project } => {
                write!(f, "`{person}` is not a member of project `{project}`")
            }
        }
    }
}

impl Error for MembershipError {}

/// Project field violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    BlankName,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "project name must not be blank"),
        }
    }
}

impl Error for ProjectValidationError {}

/// A project with a deadline and a non-empty set of member persons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
    members: BTreeSet<String>,
}

impl Project {
    /// Creates a project from member identity keys.
    ///
    /// # Errors
    /// - `MembershipError::WouldBeEmpty` when `members` yields nothing.
    pub fn new<I, S>(
        name: impl Into<String>,
        priority: Priority,
        deadline: NaiveDate,
        members: I,
    ) -> Result<Self, MembershipError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let members: BTreeSet<String> = members.into_iter().map(Into::into).collect();
        if members.is_empty() {
            return Err(MembershipError::WouldBeEmpty { project: name });
        }
        Ok(Self {
            name,
            priority,
            deadline,
            members,
        })
    }

    /// Checks the constraints that hold for every stored project.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::BlankName);
        }
        Ok(())
    }

    /// Member identity keys in lexical order.
    pub fn members(&self) -> &BTreeSet<String> {
        &self.members
    }

    pub fn has_member(&self, person: &str) -> bool {
        self.members.contains(person)
    }

    /// Returns a copy with edited details and the same member set.
    pub fn with_details(
        &self,
        name: impl Into<String>,
        priority: Priority,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            deadline,
            members: self.members.clone(),
        }
    }

    /// Adds members idempotently.
    ///
    /// Returns the derived project and the keys that were not already members,
    /// in request order.
    pub fn with_members_added<'a, I>(&self, persons: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut updated = self.clone();
        let mut added = Vec::new();
        for person in persons {
            if updated.members.insert(person.to_string()) {
                added.push(person.to_string());
            }
        }
        (updated, added)
    }

    /// Removes every listed member.
    ///
    /// # Errors
    /// - `NotAMember` for the first key that is not a current member.
    /// - `WouldBeEmpty` when no member would remain.
    pub fn with_members_removed<'a, I>(&self, persons: I) -> Result<Self, MembershipError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut updated = self.clone();
        for person in persons {
            if !updated.members.remove(person) {
                return Err(MembershipError::NotAMember {
                    person: person.to_string(),
                    project: self.name.clone(),
                });
            }
        }
        if updated.members.is_empty() {
            return Err(MembershipError::WouldBeEmpty {
                project: self.name.clone(),
            });
        }
        Ok(updated)
    }

    /// Re-keys members after person renames, applying every rename at once.
    ///
    /// Returns `None` when no member is affected.
    pub fn with_members_rekeyed(&self, renames: &HashMap<String, String>) -> Option<Self> {
        if !self.members.iter().any(|member| renames.contains_key(member)) {
            return None;
        }
        let mut updated = self.clone();
        updated.members = self
            .members
            .iter()
            .map(|member| renames.get(member).unwrap_or(member).clone())
            .collect();
        Some(updated)
    }
}

impl Identified for Project {
    const KIND: EntityKind = EntityKind::Project;

    fn identity_key(&self) -> &str {
        &self.name
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Deadline: {}, Priority: {})",
            self.name, self.deadline, self.priority
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MembershipError, Project, ProjectValidationError};
    use crate::model::priority::Priority;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn launch() -> Project {
        let deadline = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        Project::new("Launch", Priority::High, deadline, ["Alice", "Bob"]).unwrap()
    }

    #[test]
    fn new_rejects_empty_member_set() {
        let deadline = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let err = Project::new("Empty", Priority::Low, deadline, Vec::<String>::new()).unwrap_err();
        assert_eq!(err, MembershipError::WouldBeEmpty { project: "Empty".into() });
    }

    #[test]
    fn adding_existing_members_is_a_no_op() {
        let (updated, added) = launch().with_members_added(["Bob", "Carol", "Carol"]);
        assert_eq!(added, vec!["Carol".to_string()]);
        assert_eq!(updated.members().len(), 3);

        let (same, none) = launch().with_members_added(["Alice"]);
        assert!(none.is_empty());
        assert_eq!(same, launch());
    }

    #[test]
    fn removing_non_member_or_last_member_fails_without_change() {
        let project = launch();
        assert_eq!(
            project.with_members_removed(["Carol"]).unwrap_err(),
            MembershipError::NotAMember { person: "Carol".into(), project: "Launch".into() }
        );
        assert_eq!(
            project.with_members_removed(["Alice", "Bob"]).unwrap_err(),
            MembershipError::WouldBeEmpty { project: "Launch".into() }
        );
        assert_eq!(project.members().len(), 2);
    }

    #[test]
    fn rename_and_detail_edits_keep_members() {
        let swap: HashMap<String, String> = [("Alice", "Bob"), ("Bob", "Alice")]
            .into_iter()
            .map(|(old, new)| (old.to_string(), new.to_string()))
            .collect();
        assert_eq!(launch().with_members_rekeyed(&swap).unwrap().members(), launch().members());

        let rename: HashMap<String, String> =
            [("Alice".to_string(), "Alicia".to_string())].into_iter().collect();
        let renamed = launch().with_members_rekeyed(&rename).unwrap();
        assert!(renamed.has_member("Alicia"));
        assert!(!renamed.has_member("Alice"));
        let unrelated: HashMap<String, String> =
            [("Zed".to_string(), "Z".to_string())].into_iter().collect();
        assert!(launch().with_members_rekeyed(&unrelated).is_none());

        let deadline = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let edited = launch().with_details("Relaunch", Priority::Low, deadline);
        assert_eq!(edited.members(), launch().members());
        assert_eq!(edited.to_string(), "Relaunch (Deadline: 2026-01-01, Priority: LOW)");
    }

    #[test]
    fn blank_name_fails_validation() {
        assert_eq!(launch().validate(), Ok(()));
        let blank = launch().with_details("   ", Priority::Low, launch().deadline);
        assert_eq!(blank.validate(), Err(ProjectValidationError::BlankName));
    }
}
