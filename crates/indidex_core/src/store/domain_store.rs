//! Single mutation boundary for persons, projects and memberships.
//!
//! # Responsibility
//! - Own the person and project collections.
//! - Apply membership rules and cascades as part of each mutation.
//!
//! # Invariants
//! - Person and project identities are unique.
//! - Every project member key names an existing person.
//! - No project has an empty member set.
//! - A failing call leaves both collections untouched.
//! - Deletion cascades replace projects before persons are removed.
//! - Renames replace persons first and re-key projects second, so project
//!   listeners only ever see members that resolve; person listeners can briefly
//!   see projects still keyed by the old name.

use crate::model::identity::EntityKind;
use crate::model::person::{Person, PersonValidationError};
use crate::model::project::{MembershipError, Project, ProjectValidationError};
use crate::store::unique_collection::{CollectionError, UniqueCollection};
use crate::store::view::{Comparator, FilteredSortedView};
use log::debug;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Duplicate { kind: EntityKind, key: String },
    NotFound { kind: EntityKind, key: String },
    LastMember { project: String },
    MemberNotInProject { person: String, project: String },
    InvalidPerson(PersonValidationError),
    InvalidProject(ProjectValidationError),
    /// A state the callers should have made unreachable.
    InvariantViolation(String),
}

impl StoreError {
    fn from_collection(kind: EntityKind, err: CollectionError) -> Self {
        match err {
            CollectionError::Duplicate(key) => Self::Duplicate { kind, key },
            CollectionError::NotFound(key) => Self::NotFound { kind, key },
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { kind, key } => write!(f, "{kind} already exists: {key}"),
            Self::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            Self::LastMember { project } => {
                write!(f, "project `{project}` cannot have no members")
            }
            Self::MemberNotInProject { person, project } => {
                write!(f, "`{person}` is not a member of project `{project}`")
            }
            Self::InvalidPerson(err) => write!(f, "{err}"),
            Self::InvalidProject(err) => write!(f, "{err}"),
            Self::InvariantViolation(message) => write!(f, "invariant violated: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPerson(err) => Some(err),
            Self::InvalidProject(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MembershipError> for StoreError {
    fn from(value: MembershipError) -> Self {
        match value {
            MembershipError::WouldBeEmpty { project } => Self::LastMember { project },
            MembershipError::NotAMember { person, project } => {
                Self::MemberNotInProject { person, project }
            }
        }
    }
}

impl From<PersonValidationError> for StoreError {
    fn from(value: PersonValidationError) -> Self {
        Self::InvalidPerson(value)
    }
}

impl From<ProjectValidationError> for StoreError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

/// In-memory address book: persons, projects and the membership relation.
#[derive(Debug, Default)]
pub struct DomainStore {
    persons: UniqueCollection<Person>,
    projects: UniqueCollection<Project>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from full collections, validating every invariant.
    pub fn with_data(persons: Vec<Person>, projects: Vec<Project>) -> StoreResult<Self> {
        let mut store = Self::new();
        store.reset(persons, projects)?;
        Ok(store)
    }

    pub fn persons(&self) -> &[Person] {
        self.persons.as_slice()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.as_slice()
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.persons.get(name)
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// Returns whether a person with the same identity exists.
    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    /// Returns whether a project with the same identity exists.
    pub fn has_project(&self, project: &Project) -> bool {
        self.projects.contains(project)
    }

    /// Projects listing `person` as a member, in project order.
    pub fn projects_of(&self, person: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.has_member(person))
            .collect()
    }

    /// Resolves a project's member keys to persons, in person-list order.
    ///
    /// # Errors
    /// - `InvariantViolation` when a member key names no person.
    pub fn members_of(&self, project: &Project) -> StoreResult<Vec<&Person>> {
        if let Some(missing) = project
            .members()
            .iter()
            .find(|member| !self.persons.contains_key(member))
        {
            return Err(StoreError::InvariantViolation(format!(
                "project `{}` references missing person `{missing}`",
                project.name
            )));
        }
        Ok(self
            .persons
            .iter()
            .filter(|person| project.has_member(&person.name))
            .collect())
    }

    /// Attaches a live person view in backing order.
    pub fn attach_person_view(&mut self) -> FilteredSortedView<Person> {
        FilteredSortedView::attach(&mut self.persons)
    }

    /// Attaches a live project view, optionally ordered.
    pub fn attach_project_view(
        &mut self,
        comparator: Option<Comparator<Project>>,
    ) -> FilteredSortedView<Project> {
        match comparator {
            Some(comparator) => FilteredSortedView::attach_sorted(&mut self.projects, comparator),
            None => FilteredSortedView::attach(&mut self.projects),
        }
    }

    /// Adds a new person.
    pub fn add_person(&mut self, person: Person) -> StoreResult<()> {
        person.validate()?;
        self.persons
            .add(person)
            .map_err(|err| StoreError::from_collection(EntityKind::Person, err))?;
        debug!("event=person_added module=store status=ok");
        Ok(())
    }

    /// Replaces the person keyed `target`; a rename re-keys every membership.
    pub fn set_person(&mut self, target: &str, replacement: Person) -> StoreResult<()> {
        self.set_persons(vec![(target.to_string(), replacement)])
    }

    /// Replaces several persons as one operation.
    ///
    /// Renames are applied to every project membership in the same call, after
    /// the person collection has been updated.
    pub fn set_persons(&mut self, replacements: Vec<(String, Person)>) -> StoreResult<()> {
        for (_, replacement) in &replacements {
            replacement.validate()?;
        }
        let renames: HashMap<String, String> = replacements
            .iter()
            .filter(|(target, replacement)| *target != replacement.name)
            .map(|(target, replacement)| (target.clone(), replacement.name.clone()))
            .collect();
        let project_updates = self.rekeyed_projects(&renames);

        self.persons
            .replace_many(replacements)
            .map_err(|err| StoreError::from_collection(EntityKind::Person, err))?;
        let rekeyed = project_updates.len();
        self.projects.replace_many(project_updates).map_err(|err| {
            StoreError::InvariantViolation(format!("membership re-key failed: {err}"))
        })?;
        debug!(
            "event=persons_replaced module=store status=ok renamed={} rekeyed_projects={}",
            renames.len(),
            rekeyed
        );
        Ok(())
    }

    /// Deletes one person, removing it from every project.
    pub fn delete_person(&mut self, name: &str) -> StoreResult<Person> {
        let mut removed = self.delete_persons(&[name.to_string()])?;
        removed
            .pop()
            .ok_or_else(|| StoreError::InvariantViolation(format!("person `{name}` vanished")))
    }

    /// Deletes several persons and their memberships as one operation.
    ///
    /// # Errors
    /// - `NotFound` / `Duplicate` for unknown or repeated keys.
    /// - `LastMember` when any project would be left without members; nothing
    ///   is deleted in that case.
    pub fn delete_persons(&mut self, names: &[String]) -> StoreResult<Vec<Person>> {
        let mut targets = HashSet::new();
        for name in names {
            if !self.persons.contains_key(name) {
                return Err(StoreError::NotFound {
                    kind: EntityKind::Person,
                    key: name.clone(),
                });
            }
            if !targets.insert(name.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: EntityKind::Person,
                    key: name.clone(),
                });
            }
        }

        let mut project_updates = Vec::new();
        for project in self.projects.iter() {
            let leaving: Vec<&str> = project
                .members()
                .iter()
                .map(String::as_str)
                .filter(|member| targets.contains(member))
                .collect();
            if leaving.is_empty() {
                continue;
            }
            let updated = project.with_members_removed(leaving)?;
            project_updates.push((project.name.clone(), updated));
        }

        let cascaded = project_updates.len();
        self.projects.replace_many(project_updates).map_err(|err| {
            StoreError::InvariantViolation(format!("membership cascade failed: {err}"))
        })?;
        let removed = self
            .persons
            .remove_many(names)
            .map_err(|err| StoreError::from_collection(EntityKind::Person, err))?;
        debug!(
            "event=persons_deleted module=store status=ok count={} cascaded_projects={}",
            removed.len(),
            cascaded
        );
        Ok(removed)
    }

    /// Adds a project whose members all exist.
    pub fn add_project(&mut self, project: Project) -> StoreResult<()> {
        project.validate()?;
        self.ensure_members_exist(&project)?;
        self.projects
            .add(project)
            .map_err(|err| StoreError::from_collection(EntityKind::Project, err))?;
        debug!("event=project_added module=store status=ok");
        Ok(())
    }

    /// Replaces the project keyed `target`.
    pub fn set_project(&mut self, target: &str, replacement: Project) -> StoreResult<()> {
        replacement.validate()?;
        self.ensure_members_exist(&replacement)?;
        self.projects
            .replace(target, replacement)
            .map_err(|err| StoreError::from_collection(EntityKind::Project, err))?;
        debug!("event=project_replaced module=store status=ok");
        Ok(())
    }

    /// Deletes a project; its members are unaffected.
    pub fn delete_project(&mut self, name: &str) -> StoreResult<Project> {
        let removed = self
            .projects
            .remove(name)
            .map_err(|err| StoreError::from_collection(EntityKind::Project, err))?;
        debug!("event=project_deleted module=store status=ok");
        Ok(removed)
    }

    /// Reorders the person collection in place.
    pub fn sort_persons<F>(&mut self, compare: F)
    where
        F: FnMut(&Person, &Person) -> Ordering,
    {
        self.persons.sort_by(compare);
        debug!("event=persons_sorted module=store status=ok");
    }

    /// Replaces all data after validating uniqueness and member references.
    ///
    /// Nothing changes when validation fails.
    pub fn reset(&mut self, persons: Vec<Person>, projects: Vec<Project>) -> StoreResult<()> {
        let mut person_keys = HashSet::with_capacity(persons.len());
        for person in &persons {
            person.validate()?;
            if !person_keys.insert(person.name.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: EntityKind::Person,
                    key: person.name.clone(),
                });
            }
        }
        let mut project_keys = HashSet::with_capacity(projects.len());
        for project in &projects {
            project.validate()?;
            if !project_keys.insert(project.name.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: EntityKind::Project,
                    key: project.name.clone(),
                });
            }
            if let Some(missing) = project
                .members()
                .iter()
                .find(|member| !person_keys.contains(member.as_str()))
            {
                return Err(StoreError::InvariantViolation(format!(
                    "project `{}` references missing person `{missing}`",
                    project.name
                )));
            }
        }

        let (person_count, project_count) = (persons.len(), projects.len());
        let into_invariant =
            |err: CollectionError| StoreError::InvariantViolation(format!("reset failed: {err}"));
        self.projects.set_all(Vec::new()).map_err(into_invariant)?;
        self.persons.set_all(persons).map_err(into_invariant)?;
        self.projects.set_all(projects).map_err(into_invariant)?;
        debug!(
            "event=store_reset module=store status=ok persons={} projects={}",
            person_count, project_count
        );
        Ok(())
    }

    fn ensure_members_exist(&self, project: &Project) -> StoreResult<()> {
        if project.members().is_empty() {
            return Err(StoreError::LastMember {
                project: project.name.clone(),
            });
        }
        match project
            .members()
            .iter()
            .find(|member| !self.persons.contains_key(member))
        {
            Some(missing) => Err(StoreError::InvariantViolation(format!(
                "project `{}` references missing person `{missing}`",
                project.name
            ))),
            None => Ok(()),
        }
    }

    fn rekeyed_projects(&self, renames: &HashMap<String, String>) -> Vec<(String, Project)> {
        if renames.is_empty() {
            return Vec::new();
        }
        self.projects
            .iter()
            .filter_map(|project| {
                project
                    .with_members_rekeyed(renames)
                    .map(|updated| (project.name.clone(), updated))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainStore, StoreError};
    use crate::model::identity::EntityKind;
    use crate::model::person::Person;
    use crate::model::priority::Priority;
    use crate::model::project::{Project, ProjectValidationError};
    use crate::store::unique_collection::ListenerStatus;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn person(name: &str) -> Person {
        Person::new(name, "91234567", "someone@example.com", "Blk 1", Priority::Low)
    }

    fn project(name: &str, members: &[&str]) -> Project {
        let deadline = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        Project::new(name, Priority::High, deadline, members.iter().copied()).unwrap()
    }

    fn seeded() -> DomainStore {
        DomainStore::with_data(
            vec![person("Alice"), person("Bob"), person("Carol")],
            vec![project("Launch", &["Alice", "Bob"]), project("Solo", &["Carol"])],
        )
        .unwrap()
    }

    #[test]
    fn rename_rekeys_memberships() {
        let mut store = seeded();
        let mut renamed = person("Alicia");
        renamed.phone = "80000000".into();
        store.set_person("Alice", renamed).unwrap();

        let launch = store.project("Launch").unwrap();
        assert!(launch.has_member("Alicia"));
        assert!(!launch.has_member("Alice"));
        assert_eq!(store.members_of(launch).unwrap().len(), 2);
    }

    #[test]
    fn rename_into_existing_name_changes_nothing() {
        let mut store = seeded();
        let err = store.set_person("Alice", person("Bob")).unwrap_err();
        assert_eq!(err, StoreError::Duplicate { kind: EntityKind::Person, key: "Bob".into() });
        assert!(store.project("Launch").unwrap().has_member("Alice"));
        assert!(store.person("Alice").is_some());
    }

    #[test]
    fn deleting_sole_member_is_rejected_upfront() {
        let mut store = seeded();
        let err = store.delete_person("Carol").unwrap_err();
        assert_eq!(err, StoreError::LastMember { project: "Solo".into() });
        assert_eq!(store.persons().len(), 3);
        assert!(store.project("Solo").unwrap().has_member("Carol"));
    }

    #[test]
    fn batch_delete_that_empties_a_project_deletes_nobody() {
        let mut store = seeded();
        let err = store
            .delete_persons(&["Alice".to_string(), "Bob".to_string()])
            .unwrap_err();
        assert_eq!(err, StoreError::LastMember { project: "Launch".into() });
        assert_eq!(store.persons().len(), 3);
        assert_eq!(store.project("Launch").unwrap().members().len(), 2);
    }

    #[test]
    fn add_project_rejects_unknown_members() {
        let mut store = seeded();
        let err = store.add_project(project("Ghost", &["Zed"])).unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));
        assert_eq!(store.projects().len(), 2);
    }

    #[test]
    fn reset_validates_before_replacing() {
        let mut store = seeded();
        let err = store
            .reset(vec![person("Dan")], vec![project("Launch", &["Alice"])])
            .unwrap_err();
        assert!(matches!(err, StoreError::InvariantViolation(_)));
        assert_eq!(store.persons().len(), 3);

        let err = store
            .reset(vec![person("Dan"), person("Dan")], Vec::new())
            .unwrap_err();
        assert_eq!(err, StoreError::Duplicate { kind: EntityKind::Person, key: "Dan".into() });
    }

    #[test]
    fn projects_of_scans_membership() {
        let store = seeded();
        let names: Vec<_> = store
            .projects_of("Alice")
            .into_iter()
            .map(|project| project.name.as_str())
            .collect();
        assert_eq!(names, vec!["Launch"]);
        assert!(store.projects_of("Nobody").is_empty());
    }

    #[test]
    fn blank_project_names_never_reach_the_store() {
        let mut store = seeded();
        let blank = project("  ", &["Alice"]);
        assert_eq!(
            store.add_project(blank.clone()).unwrap_err(),
            StoreError::InvalidProject(ProjectValidationError::BlankName)
        );
        assert!(matches!(
            store.set_project("Solo", blank.clone()),
            Err(StoreError::InvalidProject(_))
        ));
        assert!(matches!(
            store.reset(vec![person("Alice")], vec![blank]),
            Err(StoreError::InvalidProject(_))
        ));
        assert_eq!(store.projects().len(), 2);
        assert!(store.project("Solo").is_some());
    }

    #[test]
    fn project_listeners_see_renamed_members_that_resolve() {
        let mut store = seeded();
        let person_keys = Rc::new(RefCell::new(HashSet::new()));
        let unresolved = Rc::new(RefCell::new(Vec::new()));

        let keys = Rc::clone(&person_keys);
        store.persons.subscribe(Box::new(move |_, persons: &[Person]| {
            *keys.borrow_mut() = persons.iter().map(|person| person.name.clone()).collect();
            ListenerStatus::Keep
        }));
        let keys = Rc::clone(&person_keys);
        let seen = Rc::clone(&unresolved);
        store.projects.subscribe(Box::new(move |_, projects: &[Project]| {
            for project in projects {
                for member in project.members() {
                    if !keys.borrow().contains(member) {
                        seen.borrow_mut().push(member.clone());
                    }
                }
            }
            ListenerStatus::Keep
        }));

        store.set_person("Alice", person("Alicia")).unwrap();
        assert!(person_keys.borrow().contains("Alicia"));
        assert!(unresolved.borrow().is_empty());
    }
}
