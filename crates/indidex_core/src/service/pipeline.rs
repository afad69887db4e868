//! Command execution pipeline.
//!
//! # Responsibility
//! - Resolve view indices and project names against current state.
//! - Enforce business rules before any mutation happens.
//! - Apply exactly one store (or view) mutation per successful command.
//!
//! # Invariants
//! - Each command moves through `received -> validated -> executed` and ends
//!   as either `ok` or `error`; every stage is logged.
//! - Index errors are reported before any other rule failure.
//! - A failing command leaves the store and the views unchanged.

use crate::config::CoreConfig;
use crate::model::identity::EntityKind;
use crate::model::person::{Person, PersonValidationError};
use crate::model::priority::{Priority, PriorityOrder};
use crate::model::project::{MembershipError, Project};
use crate::service::clock::{Clock, SystemClock};
use crate::service::command::{Command, CommandResult, PersonEdit, ProjectEdit, UiAction};
use crate::service::predicate::{keywords_predicate, matches_any_keyword};
use crate::service::sort::{person_comparator, SortDirection, SortField};
use crate::service::workspace::Workspace;
use crate::store::domain_store::{DomainStore, StoreError};
use crate::store::view::{accept_all, FilteredSortedView, Predicate};
use chrono::{Days, NaiveDate};
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type PipelineResult<T> = Result<T, CommandError>;

/// Recoverable command failures, plus one fatal class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    DuplicateEntity { kind: EntityKind, key: String },
    EntityNotFound { kind: EntityKind, key: String },
    /// One-based `index` does not address the `visible` person list.
    InvalidIndex { index: usize, visible: usize },
    LastMember { project: String },
    MemberNotInProject { person: String, project: String },
    NoNewMembers { project: String },
    InvalidField { field: &'static str, reason: String },
    /// Store state contradicted a checked rule; the host should stop.
    InvariantViolation(String),
}

impl CommandError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    /// Stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateEntity { .. } => "duplicate_entity",
            Self::EntityNotFound { .. } => "entity_not_found",
            Self::InvalidIndex { .. } => "invalid_index",
            Self::LastMember { .. } => "last_member",
            Self::MemberNotInProject { .. } => "member_not_in_project",
            Self::NoNewMembers { .. } => "no_new_members",
            Self::InvalidField { .. } => "invalid_field",
            Self::InvariantViolation(_) => "invariant_violation",
        }
    }

    fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity { kind, .. } => {
                write!(f, "This {kind} already exists in the address book")
            }
            Self::EntityNotFound { kind: EntityKind::Project, key } => {
                write!(f, "Project '{key}' not found!")
            }
            Self::EntityNotFound { kind, key } => write!(f, "{kind} '{key}' not found!"),
            Self::InvalidIndex { .. } => write!(f, "The person index provided is invalid"),
            Self::LastMember { project } => write!(
                f,
                "Project '{project}' cannot have no members. pdelete or add new members first."
            ),
            Self::MemberNotInProject { person, project } => {
                write!(f, "{person} is not a member of `{project}`")
            }
            Self::NoNewMembers { project } => {
                write!(f, "All specified members already in `{project}`")
            }
            Self::InvalidField { reason, .. } => f.write_str(reason),
            Self::InvariantViolation(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for CommandError {}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate { kind, key } => Self::DuplicateEntity { kind, key },
            StoreError::NotFound { kind, key } => Self::EntityNotFound { kind, key },
            StoreError::LastMember { project } => Self::LastMember { project },
            StoreError::MemberNotInProject { person, project } => {
                Self::MemberNotInProject { person, project }
            }
            StoreError::InvalidPerson(err) => err.into(),
            StoreError::InvalidProject(err) => Self::invalid_field("name", err.to_string()),
            StoreError::InvariantViolation(message) => Self::InvariantViolation(message),
        }
    }
}

impl From<MembershipError> for CommandError {
    fn from(value: MembershipError) -> Self {
        StoreError::from(value).into()
    }
}

impl From<PersonValidationError> for CommandError {
    fn from(value: PersonValidationError) -> Self {
        let field = match value {
            PersonValidationError::BlankName => "name",
            PersonValidationError::BlankField(field) => field,
            PersonValidationError::BlankTag => "tag",
        };
        Self::invalid_field(field, value.to_string())
    }
}

/// The single state change a validated command performs.
enum Mutation {
    None,
    AddPerson(Person),
    SetPersons(Vec<(String, Person)>),
    DeletePersons(Vec<String>),
    SortPersons(SortField, SortDirection),
    FilterPersons(Predicate<Person>),
    AddProject(Project),
    SetProject { target: String, replacement: Project },
    DeleteProject(String),
}

struct Plan {
    mutation: Mutation,
    result: CommandResult,
}

impl Plan {
    fn new(mutation: Mutation, result: CommandResult) -> Self {
        Self { mutation, result }
    }

    fn display(result: CommandResult) -> Self {
        Self::new(Mutation::None, result)
    }
}

/// Validates and executes commands against a [`Workspace`].
#[derive(Debug, Clone)]
pub struct CommandPipeline<C = SystemClock> {
    config: CoreConfig,
    clock: C,
}

impl CommandPipeline<SystemClock> {
    pub fn new(config: CoreConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for CommandPipeline<SystemClock> {
    fn default() -> Self {
        Self::new(CoreConfig::default())
    }
}

impl<C: Clock> CommandPipeline<C> {
    pub fn with_clock(config: CoreConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Runs one command.
    ///
    /// # Errors
    /// - Any [`CommandError`]; the workspace is unchanged when one is returned.
    pub fn execute(
        &self,
        workspace: &mut Workspace,
        command: Command,
    ) -> PipelineResult<CommandResult> {
        let started_at = Instant::now();
        let word = command.word();
        info!(
            "event=command_execute module=pipeline status=start command={word} mutating={}",
            command.is_mutating()
        );

        let outcome = self.validate(workspace, command).and_then(|plan| {
            debug!("event=command_validated module=pipeline status=ok command={word}");
            self.apply(workspace, plan.mutation)?;
            debug!("event=command_executed module=pipeline status=ok command={word}");
            Ok(plan.result)
        });

        match &outcome {
            Ok(_) => info!(
                "event=command_execute module=pipeline status=ok command={word} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) if err.is_fatal() => error!(
                "event=command_execute module=pipeline status=error command={word} duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
            Err(err) => warn!(
                "event=command_execute module=pipeline status=error command={word} duration_ms={} error_code={}",
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        outcome
    }

    fn validate(&self, workspace: &Workspace, command: Command) -> PipelineResult<Plan> {
        let store = workspace.store();
        let view = workspace.person_view();
        match command {
            Command::AddPerson(person) => self.plan_add_person(store, person),
            Command::EditPerson { index, edit } => self.plan_edit_person(store, view, index, edit),
            Command::DeletePersons { indices } => self.plan_delete_persons(store, view, &indices),
            Command::TagPersons { indices, tags } => self.plan_tag_persons(view, &indices, tags),
            Command::FindPersons { keywords } => self.plan_find_persons(store, keywords),
            Command::ListPersons => Ok(Plan::new(
                Mutation::FilterPersons(accept_all()),
                CommandResult::message("Listed all persons"),
            )),
            Command::SortPersons { field, direction } => Ok(Plan::new(
                Mutation::SortPersons(field, direction),
                CommandResult::message("Address book has been sorted."),
            )),
            Command::AddProject {
                name,
                deadline,
                priority,
                member_indices,
            } => self.plan_add_project(store, view, &name, deadline, priority, &member_indices),
            Command::EditProject { name, edit } => self.plan_edit_project(store, &name, edit),
            Command::DeleteProject { name } => {
                let project = resolve_project(store, &name)?;
                Ok(Plan::new(
                    Mutation::DeleteProject(project.name.clone()),
                    CommandResult::message(format!("Deleted Project:\n{project}")),
                ))
            }
            Command::JoinProject {
                name,
                member_indices,
            } => self.plan_join_project(store, view, &name, &member_indices),
            Command::LeaveProject {
                name,
                member_indices,
            } => self.plan_leave_project(store, view, &name, &member_indices),
            Command::ShowPersonProjects { index } => {
                let person = resolve_index(view, index)?;
                Ok(Plan::display(CommandResult::with_action(
                    format!("Showing projects for: {}", person.name),
                    UiAction::SelectPerson { index: index - 1 },
                )))
            }
            Command::ShowProjectDetails { name } => {
                let project = resolve_project(store, &name)?;
                Ok(Plan::display(CommandResult::with_action(
                    format!("Showing details for project: {}", project.name),
                    UiAction::ShowProject {
                        name: project.name.clone(),
                    },
                )))
            }
            Command::ListProjects => Ok(Plan::display(CommandResult::with_action(
                "Listed all projects",
                UiAction::ShowAllProjects,
            ))),
            Command::DueSoon => Ok(self.plan_due_soon(store)),
        }
    }

    fn apply(&self, workspace: &mut Workspace, mutation: Mutation) -> PipelineResult<()> {
        match mutation {
            Mutation::None => {}
            Mutation::AddPerson(person) => workspace.store_mut().add_person(person)?,
            Mutation::SetPersons(replacements) => workspace.store_mut().set_persons(replacements)?,
            Mutation::DeletePersons(names) => {
                workspace.store_mut().delete_persons(&names)?;
            }
            Mutation::SortPersons(field, direction) => {
                debug!(
                    "event=persons_sort module=pipeline status=start field={field} direction={}",
                    direction.as_str()
                );
                let comparator = person_comparator(field, direction, self.config.priority_order);
                workspace.store_mut().sort_persons(comparator);
            }
            Mutation::FilterPersons(predicate) => {
                workspace.person_view_mut().update_predicate(predicate);
            }
            Mutation::AddProject(project) => workspace.store_mut().add_project(project)?,
            Mutation::SetProject {
                target,
                replacement,
            } => workspace.store_mut().set_project(&target, replacement)?,
            Mutation::DeleteProject(name) => {
                workspace.store_mut().delete_project(&name)?;
            }
        }
        Ok(())
    }

    fn plan_add_person(&self, store: &DomainStore, person: Person) -> PipelineResult<Plan> {
        person.validate()?;
        if store.has_person(&person) {
            return Err(CommandError::DuplicateEntity {
                kind: EntityKind::Person,
                key: person.name,
            });
        }
        let feedback = format!("New person added: {person}");
        Ok(Plan::new(
            Mutation::AddPerson(person),
            CommandResult::message(feedback),
        ))
    }

    fn plan_edit_person(
        &self,
        store: &DomainStore,
        view: &FilteredSortedView<Person>,
        index: usize,
        edit: PersonEdit,
    ) -> PipelineResult<Plan> {
        let target = resolve_index(view, index)?;
        if edit.is_empty() {
            return Err(CommandError::invalid_field(
                "edit",
                "At least one field to edit must be provided.",
            ));
        }
        let edited = edit.apply(&target);
        edited.validate()?;
        if edited.name != target.name && store.person(&edited.name).is_some() {
            return Err(CommandError::DuplicateEntity {
                kind: EntityKind::Person,
                key: edited.name,
            });
        }
        let feedback = format!("Edited Person: {edited}");
        Ok(Plan::new(
            Mutation::SetPersons(vec![(target.name, edited)]),
            CommandResult::message(feedback),
        ))
    }

    fn plan_delete_persons(
        &self,
        store: &DomainStore,
        view: &FilteredSortedView<Person>,
        indices: &[usize],
    ) -> PipelineResult<Plan> {
        let mut ordered: Vec<(usize, Person)> = indices
            .iter()
            .copied()
            .zip(resolve_indices(view, indices)?)
            .collect();
        ordered.sort_by_key(|(index, _)| *index);

        let names: HashSet<&str> = ordered.iter().map(|(_, person)| person.name.as_str()).collect();
        if let Some(project) = store
            .projects()
            .iter()
            .find(|project| project.members().iter().all(|member| names.contains(member.as_str())))
        {
            return Err(CommandError::LastMember {
                project: project.name.clone(),
            });
        }

        let feedback = ordered
            .iter()
            .map(|(_, person)| person.to_string())
            .collect::<Vec<_>>()
            .join(",\n");
        let targets = ordered.into_iter().map(|(_, person)| person.name).collect();
        Ok(Plan::new(
            Mutation::DeletePersons(targets),
            CommandResult::message(format!("Deleted Person(s):\n{feedback}")),
        ))
    }

    fn plan_tag_persons(
        &self,
        view: &FilteredSortedView<Person>,
        indices: &[usize],
        tags: BTreeSet<String>,
    ) -> PipelineResult<Plan> {
        let persons = resolve_indices(view, indices)?;
        let tags: BTreeSet<String> = tags.into_iter().map(|tag| tag.trim().to_string()).collect();
        if tags.is_empty() || tags.iter().any(String::is_empty) {
            return Err(CommandError::invalid_field(
                "tag",
                "Tags must be non-empty and at least one tag must be given",
            ));
        }

        let replacements: Vec<(String, Person)> = persons
            .into_iter()
            .map(|person| {
                let tagged = person.with_tags_added(&tags);
                (person.name, tagged)
            })
            .collect();
        let tag_list = tags
            .iter()
            .map(|tag| format!("[{tag}]"))
            .collect::<Vec<_>>()
            .join(", ");
        let person_list = replacements
            .iter()
            .map(|(_, person)| person.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Plan::new(
            Mutation::SetPersons(replacements),
            CommandResult::message(format!(
                "The specified person(s) now have the tag(s) {tag_list}:\n{person_list}"
            )),
        ))
    }

    fn plan_find_persons(
        &self,
        store: &DomainStore,
        keywords: Vec<String>,
    ) -> PipelineResult<Plan> {
        if keywords.iter().all(|keyword| keyword.trim().is_empty()) {
            return Err(CommandError::invalid_field(
                "keywords",
                "At least one keyword must be provided",
            ));
        }
        let listed = store
            .persons()
            .iter()
            .filter(|person| matches_any_keyword(person, &keywords))
            .count();
        Ok(Plan::new(
            Mutation::FilterPersons(keywords_predicate(keywords)),
            CommandResult::message(format!("{listed} persons listed!")),
        ))
    }

    fn plan_add_project(
        &self,
        store: &DomainStore,
        view: &FilteredSortedView<Person>,
        name: &str,
        deadline: NaiveDate,
        priority: Priority,
        member_indices: &[usize],
    ) -> PipelineResult<Plan> {
        let members = resolve_indices(view, member_indices)?;
        let name = self.checked_project_name(name)?;
        self.check_deadline(deadline)?;
        if store.project(&name).is_some() {
            return Err(CommandError::DuplicateEntity {
                kind: EntityKind::Project,
                key: name,
            });
        }
        let project = Project::new(
            name,
            priority,
            deadline,
            members.into_iter().map(|person| person.name),
        )?;
        let feedback = format!("New project added: {project}");
        Ok(Plan::new(
            Mutation::AddProject(project),
            CommandResult::message(feedback),
        ))
    }

    fn plan_edit_project(
        &self,
        store: &DomainStore,
        name: &str,
        edit: ProjectEdit,
    ) -> PipelineResult<Plan> {
        let project = resolve_project(store, name)?;
        if edit.is_empty() {
            return Err(CommandError::invalid_field(
                "edit",
                "At least one field to edit must be provided.",
            ));
        }
        let new_name = match &edit.name {
            Some(raw) => self.checked_project_name(raw)?,
            None => project.name.clone(),
        };
        if let Some(deadline) = edit.deadline {
            self.check_deadline(deadline)?;
        }
        if new_name != project.name && store.project(&new_name).is_some() {
            return Err(CommandError::DuplicateEntity {
                kind: EntityKind::Project,
                key: new_name,
            });
        }
        let edited = project.with_details(
            new_name,
            edit.priority.unwrap_or(project.priority),
            edit.deadline.unwrap_or(project.deadline),
        );
        let feedback = format!("Edited Project: {edited}");
        Ok(Plan::new(
            Mutation::SetProject {
                target: project.name.clone(),
                replacement: edited,
            },
            CommandResult::message(feedback),
        ))
    }

    fn plan_join_project(
        &self,
        store: &DomainStore,
        view: &FilteredSortedView<Person>,
        name: &str,
        member_indices: &[usize],
    ) -> PipelineResult<Plan> {
        let project = resolve_project(store, name)?;
        let joining = resolve_indices(view, member_indices)?;
        let (updated, added) =
            project.with_members_added(joining.iter().map(|person| person.name.as_str()));
        if added.is_empty() {
            return Err(CommandError::NoNewMembers {
                project: project.name.clone(),
            });
        }
        Ok(Plan::new(
            Mutation::SetProject {
                target: project.name.clone(),
                replacement: updated,
            },
            CommandResult::message(format!(
                "Added new members to `{}`: {}",
                project.name,
                added.join(", ")
            )),
        ))
    }

    fn plan_leave_project(
        &self,
        store: &DomainStore,
        view: &FilteredSortedView<Person>,
        name: &str,
        member_indices: &[usize],
    ) -> PipelineResult<Plan> {
        let project = resolve_project(store, name)?;
        let leaving = resolve_indices(view, member_indices)?;
        let updated =
            project.with_members_removed(leaving.iter().map(|person| person.name.as_str()))?;
        let removed = leaving
            .iter()
            .map(|person| person.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(Plan::new(
            Mutation::SetProject {
                target: project.name.clone(),
                replacement: updated,
            },
            CommandResult::message(format!(
                "Removed members from `{}`: \n{removed}",
                project.name
            )),
        ))
    }

    fn plan_due_soon(&self, store: &DomainStore) -> Plan {
        let today = self.clock.today();
        let until = today
            .checked_add_days(Days::new(u64::from(self.config.due_soon_days)))
            .unwrap_or(NaiveDate::MAX);
        let mut due: Vec<&Project> = store
            .projects()
            .iter()
            .filter(|project| project.deadline >= today && project.deadline <= until)
            .collect();
        due.sort_by(|left, right| {
            left.deadline.cmp(&right.deadline).then_with(|| {
                left.priority
                    .rank(PriorityOrder::HighFirst)
                    .cmp(&right.priority.rank(PriorityOrder::HighFirst))
            })
        });
        let projects: Vec<String> = due.iter().map(|project| project.name.clone()).collect();
        Plan::display(CommandResult::with_action(
            format!(
                "Opened deadline window: {} project(s) due within {} days.",
                projects.len(),
                self.config.due_soon_days
            ),
            UiAction::ShowDueSoon { projects },
        ))
    }

    fn checked_project_name(&self, raw: &str) -> PipelineResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CommandError::invalid_field(
                "name",
                "Project name must not be blank",
            ));
        }
        let max = self.config.max_project_name_len;
        if name.chars().count() > max {
            return Err(CommandError::invalid_field(
                "name",
                format!("Project name must be at most {max} characters"),
            ));
        }
        Ok(name.to_string())
    }

    fn check_deadline(&self, deadline: NaiveDate) -> PipelineResult<()> {
        let today = self.clock.today();
        if deadline < today {
            return Err(CommandError::invalid_field(
                "deadline",
                format!("Deadline {deadline} is before today ({today})"),
            ));
        }
        Ok(())
    }
}

fn resolve_index(view: &FilteredSortedView<Person>, index: usize) -> PipelineResult<Person> {
    let visible = view.len();
    if index == 0 || index > visible {
        return Err(CommandError::InvalidIndex { index, visible });
    }
    view.get(index - 1)
        .ok_or(CommandError::InvalidIndex { index, visible })
}

/// Resolves every index, then rejects repeats.
fn resolve_indices(
    view: &FilteredSortedView<Person>,
    indices: &[usize],
) -> PipelineResult<Vec<Person>> {
    if indices.is_empty() {
        return Err(CommandError::InvalidIndex {
            index: 0,
            visible: view.len(),
        });
    }
    let persons = indices
        .iter()
        .map(|index| resolve_index(view, *index))
        .collect::<PipelineResult<Vec<_>>>()?;
    let mut seen = HashSet::with_capacity(indices.len());
    if let Some(repeated) = indices.iter().find(|index| !seen.insert(**index)) {
        return Err(CommandError::invalid_field(
            "index",
            format!("Index {repeated} is given more than once"),
        ));
    }
    Ok(persons)
}

fn resolve_project<'a>(store: &'a DomainStore, name: &str) -> PipelineResult<&'a Project> {
    let key = name.trim();
    store.project(key).ok_or_else(|| CommandError::EntityNotFound {
        kind: EntityKind::Project,
        key: key.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{CommandError, CommandPipeline};
    use crate::config::CoreConfig;
    use crate::model::person::Person;
    use crate::model::priority::Priority;
    use crate::service::clock::FixedClock;
    use crate::service::command::{Command, ProjectEdit, UiAction};
    use crate::service::workspace::Workspace;
    use crate::store::domain_store::DomainStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pipeline() -> CommandPipeline<FixedClock> {
        CommandPipeline::with_clock(CoreConfig::default(), FixedClock(date(2026, 1, 10)))
    }

    fn workspace(names: &[&str]) -> Workspace {
        let persons = names
            .iter()
            .map(|name| Person::new(*name, "91234567", "x@example.com", "Blk 1", Priority::Low))
            .collect();
        Workspace::new(DomainStore::with_data(persons, Vec::new()).unwrap())
    }

    fn add_project(name: &str, deadline: NaiveDate, indices: Vec<usize>) -> Command {
        Command::AddProject {
            name: name.to_string(),
            deadline,
            priority: Priority::Medium,
            member_indices: indices,
        }
    }

    #[test]
    fn rejects_past_deadline_and_long_names() {
        let mut ws = workspace(&["Alice"]);
        let err = pipeline()
            .execute(&mut ws, add_project("Old", date(2026, 1, 9), vec![1]))
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidField { field: "deadline", .. }));

        let long = "x".repeat(36);
        let err = pipeline()
            .execute(&mut ws, add_project(&long, date(2026, 2, 1), vec![1]))
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidField { field: "name", .. }));
        assert!(ws.store().projects().is_empty());
    }

    #[test]
    fn index_errors_win_over_rule_errors() {
        let mut ws = workspace(&["Alice"]);
        let err = pipeline()
            .execute(&mut ws, add_project("  ", date(2020, 1, 1), vec![2]))
            .unwrap_err();
        assert_eq!(err, CommandError::InvalidIndex { index: 2, visible: 1 });
    }

    #[test]
    fn project_names_are_trimmed_and_case_sensitive() {
        let mut ws = workspace(&["Alice"]);
        let pipeline = pipeline();
        pipeline
            .execute(&mut ws, add_project(" Launch ", date(2026, 1, 12), vec![1]))
            .unwrap();
        let shown = pipeline
            .execute(&mut ws, Command::ShowProjectDetails { name: "Launch ".into() })
            .unwrap();
        assert_eq!(shown.action, Some(UiAction::ShowProject { name: "Launch".into() }));
        let err = pipeline
            .execute(&mut ws, Command::DeleteProject { name: "launch".into() })
            .unwrap_err();
        assert!(matches!(err, CommandError::EntityNotFound { .. }));
    }

    #[test]
    fn empty_project_edit_is_rejected() {
        let mut ws = workspace(&["Alice"]);
        let pipeline = pipeline();
        pipeline
            .execute(&mut ws, add_project("Launch", date(2026, 1, 12), vec![1]))
            .unwrap();
        let err = pipeline
            .execute(
                &mut ws,
                Command::EditProject { name: "Launch".into(), edit: ProjectEdit::default() },
            )
            .unwrap_err();
        assert!(matches!(err, CommandError::InvalidField { field: "edit", .. }));
    }

    #[test]
    fn only_invariant_violations_are_fatal() {
        assert!(CommandError::InvariantViolation("x".into()).is_fatal());
        assert!(!CommandError::NoNewMembers { project: "p".into() }.is_fatal());
    }
}
