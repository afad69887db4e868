//! Typed command intents and their results.
//!
//! # Responsibility
//! - Describe every user operation as an already-parsed value.
//! - Carry user-facing feedback plus at most one UI hint per result.
//!
//! # Invariants
//! - Person indices are one-based positions in the current filtered person view.
//! - Project names are matched exactly after trimming.

use crate::model::person::{Person, Socials};
use crate::model::priority::Priority;
use crate::service::sort::{SortDirection, SortField};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Field changes for an existing person; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub priority: Option<Priority>,
    pub socials: Option<Socials>,
    /// Replaces the whole tag set when present.
    pub tags: Option<BTreeSet<String>>,
}

impl PersonEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.priority.is_none()
            && self.socials.is_none()
            && self.tags.is_none()
    }

    /// Derives the edited person; untouched fields are copied from `person`.
    pub fn apply(&self, person: &Person) -> Person {
        Person {
            name: self.name.clone().unwrap_or_else(|| person.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| person.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| person.email.clone()),
            address: self.address.clone().unwrap_or_else(|| person.address.clone()),
            priority: self.priority.unwrap_or(person.priority),
            socials: self.socials.clone().unwrap_or_else(|| person.socials.clone()),
            tags: self.tags.clone().unwrap_or_else(|| person.tags.clone()),
        }
    }
}

/// Detail changes for an existing project; members are never edited here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl ProjectEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.deadline.is_none() && self.priority.is_none()
    }
}

/// One parsed user operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPerson(Person),
    EditPerson {
        index: usize,
        edit: PersonEdit,
    },
    DeletePersons {
        indices: Vec<usize>,
    },
    TagPersons {
        indices: Vec<usize>,
        tags: BTreeSet<String>,
    },
    FindPersons {
        keywords: Vec<String>,
    },
    ListPersons,
    SortPersons {
        field: SortField,
        direction: SortDirection,
    },
    AddProject {
        name: String,
        deadline: NaiveDate,
        priority: Priority,
        member_indices: Vec<usize>,
    },
    EditProject {
        name: String,
        edit: ProjectEdit,
    },
    DeleteProject {
        name: String,
    },
    JoinProject {
        name: String,
        member_indices: Vec<usize>,
    },
    LeaveProject {
        name: String,
        member_indices: Vec<usize>,
    },
    ShowPersonProjects {
        index: usize,
    },
    ShowProjectDetails {
        name: String,
    },
    ListProjects,
    DueSoon,
}

impl Command {
    /// Stable command word used in logs.
    pub fn word(&self) -> &'static str {
        match self {
            Self::AddPerson(_) => "add",
            Self::EditPerson { .. } => "edit",
            Self::DeletePersons { .. } => "delete",
            Self::TagPersons { .. } => "tag",
            Self::FindPersons { .. } => "find",
            Self::ListPersons => "list",
            Self::SortPersons { .. } => "sort",
            Self::AddProject { .. } => "padd",
            Self::EditProject { .. } => "pedit",
            Self::DeleteProject { .. } => "pdelete",
            Self::JoinProject { .. } => "join",
            Self::LeaveProject { .. } => "leave",
            Self::ShowPersonProjects { .. } => "pshow",
            Self::ShowProjectDetails { .. } => "pdetails",
            Self::ListProjects => "plist",
            Self::DueSoon => "deadline",
        }
    }

    /// Whether a successful run changes the store.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddPerson(_)
                | Self::EditPerson { .. }
                | Self::DeletePersons { .. }
                | Self::TagPersons { .. }
                | Self::SortPersons { .. }
                | Self::AddProject { .. }
                | Self::EditProject { .. }
                | Self::DeleteProject { .. }
                | Self::JoinProject { .. }
                | Self::LeaveProject { .. }
        )
    }
}

/// UI hint attached to a successful result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Select the person at this zero-based position of the person view.
    SelectPerson { index: usize },
    ShowProject { name: String },
    ShowAllProjects,
    /// Projects due within the window, soonest first.
    ShowDueSoon { projects: Vec<String> },
}

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub action: Option<UiAction>,
}

impl CommandResult {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            action: None,
        }
    }

    pub fn with_action(feedback: impl Into<String>, action: UiAction) -> Self {
        Self {
            feedback: feedback.into(),
            action: Some(action),
        }
    }
}
