//! Persistence boundary records and the two-pass load.
//!
//! # Responsibility
//! - Expose the full person/project collections as plain serializable records.
//! - Rebuild a consistent store from records: persons first, then projects with
//!   member names resolved by identity key.
//!
//! # Invariants
//! - Loading validates everything before the target store is touched.
//! - Records missing optional sections (`projects`, `members`, `socials`, `tags`)
//!   load as empty for older files.

use crate::model::identity::EntityKind;
use crate::model::person::{Person, PersonValidationError, Socials};
use crate::model::priority::Priority;
use crate::model::project::Project;
use crate::store::domain_store::{DomainStore, StoreError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whole-store record set handed to and received from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialsRecord {
    pub discord: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Older files have no priority; they load as `LOW`.
    pub priority: Option<Priority>,
    #[serde(default)]
    pub socials: SocialsRecord,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    /// Member persons by name.
    #[serde(default)]
    pub members: Vec<String>,
}

/// Load failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },
    InvalidPerson(PersonValidationError),
    DuplicatePerson(String),
    DuplicateProject(String),
    UnknownMember {
        project: String,
        member: String,
    },
    EmptyMembers(String),
    Store(StoreError),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { kind, field } => write!(f, "{kind}'s {field} field is missing"),
            Self::InvalidPerson(err) => write!(f, "{err}"),
            Self::DuplicatePerson(name) => write!(f, "persons list contains duplicate `{name}`"),
            Self::DuplicateProject(name) => {
                write!(f, "projects list contains duplicate `{name}`")
            }
            Self::UnknownMember { project, member } => {
                write!(f, "project `{project}` lists unknown member `{member}`")
            }
            Self::EmptyMembers(project) => write!(f, "project `{project}` has no members"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPerson(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SnapshotError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<&Person> for PersonRecord {
    fn from(person: &Person) -> Self {
        Self {
            name: Some(person.name.clone()),
            phone: Some(person.phone.clone()),
            email: Some(person.email.clone()),
            address: Some(person.address.clone()),
            priority: Some(person.priority),
            socials: SocialsRecord {
                discord: person.socials.discord.clone(),
                linkedin: person.socials.linkedin.clone(),
                instagram: person.socials.instagram.clone(),
                youtube: person.socials.youtube.clone(),
            },
            tags: person.tags.iter().cloned().collect(),
        }
    }
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            name: Some(project.name.clone()),
            priority: Some(project.priority),
            deadline: Some(project.deadline),
            members: project.members().iter().cloned().collect(),
        }
    }
}

fn required<T>(
    value: Option<T>,
    kind: EntityKind,
    field: &'static str,
) -> Result<T, SnapshotError> {
    value.ok_or(SnapshotError::MissingField { kind, field })
}

impl PersonRecord {
    fn into_person(self) -> Result<Person, SnapshotError> {
        let kind = EntityKind::Person;
        let person = Person::new(
            required(self.name, kind, "name")?,
            required(self.phone, kind, "phone")?,
            required(self.email, kind, "email")?,
            required(self.address, kind, "address")?,
            self.priority.unwrap_or(Priority::Low),
        )
        .with_socials(Socials::new(
            self.socials.discord,
            self.socials.linkedin,
            self.socials.instagram,
            self.socials.youtube,
        ))
        .with_tags(self.tags);
        person.validate().map_err(SnapshotError::InvalidPerson)?;
        Ok(person)
    }
}

impl StoreSnapshot {
    /// Copies the current store contents, preserving list order.
    pub fn from_store(store: &DomainStore) -> Self {
        Self {
            persons: store.persons().iter().map(PersonRecord::from).collect(),
            projects: store.projects().iter().map(ProjectRecord::from).collect(),
        }
    }

    /// Builds a fresh store from these records.
    pub fn into_store(self) -> Result<DomainStore, SnapshotError> {
        let (persons, projects) = self.into_entities()?;
        Ok(DomainStore::with_data(persons, projects)?)
    }

    /// Replaces the contents of `store`, keeping its attached views alive.
    pub fn load_into(self, store: &mut DomainStore) -> Result<(), SnapshotError> {
        let (persons, projects) = self.into_entities()?;
        store.reset(persons, projects)?;
        Ok(())
    }

    fn into_entities(self) -> Result<(Vec<Person>, Vec<Project>), SnapshotError> {
        let mut persons = Vec::with_capacity(self.persons.len());
        let mut names = HashSet::with_capacity(self.persons.len());
        for record in self.persons {
            let person = record.into_person()?;
            if !names.insert(person.name.clone()) {
                return Err(SnapshotError::DuplicatePerson(person.name));
            }
            persons.push(person);
        }

        let mut projects = Vec::with_capacity(self.projects.len());
        let mut project_names = HashSet::with_capacity(self.projects.len());
        for record in self.projects {
            let kind = EntityKind::Project;
            let name = required(record.name, kind, "name")?;
            if name.trim().is_empty() {
                return Err(SnapshotError::MissingField {
                    kind,
                    field: "name",
                });
            }
            let priority = required(record.priority, kind, "priority")?;
            let deadline = required(record.deadline, kind, "deadline")?;
            if let Some(member) = record.members.iter().find(|member| !names.contains(*member)) {
                return Err(SnapshotError::UnknownMember {
                    project: name,
                    member: member.clone(),
                });
            }
            let project = Project::new(name.clone(), priority, deadline, record.members)
                .map_err(|_| SnapshotError::EmptyMembers(name.clone()))?;
            if !project_names.insert(name.clone()) {
                return Err(SnapshotError::DuplicateProject(name));
            }
            projects.push(project);
        }

        Ok((persons, projects))
    }
}
