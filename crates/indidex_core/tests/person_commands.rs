use chrono::NaiveDate;
use indidex_core::model::sample::sample_persons;
use indidex_core::{
    Command, CommandError, CommandPipeline, CoreConfig, DomainStore, FixedClock, Person,
    Priority, PriorityOrder, SortDirection, SortField, UiAction, Workspace,
};
use std::collections::BTreeSet;

fn pipeline_with(config: CoreConfig) -> CommandPipeline<FixedClock> {
    CommandPipeline::with_clock(config, FixedClock(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
}

fn pipeline() -> CommandPipeline<FixedClock> {
    pipeline_with(CoreConfig::default())
}

fn sample_workspace() -> Workspace {
    Workspace::new(DomainStore::with_data(sample_persons(), Vec::new()).unwrap())
}

fn person(name: &str, email: &str, priority: Priority) -> Person {
    Person::new(name, "91234567", email, "Blk 1", priority)
}

fn visible_names(ws: &Workspace) -> Vec<String> {
    ws.person_view()
        .items()
        .iter()
        .map(|person| person.name.clone())
        .collect()
}

#[test]
fn batch_delete_is_all_or_nothing() {
    let persons = vec![
        person("Alice", "a@x.com", Priority::Low),
        person("Bob", "b@x.com", Priority::Low),
        person("Carol", "c@x.com", Priority::Low),
    ];
    let mut ws = Workspace::new(DomainStore::with_data(persons.clone(), Vec::new()).unwrap());

    let err = pipeline()
        .execute(&mut ws, Command::DeletePersons { indices: vec![1, 1, 999] })
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidIndex { index: 999, visible: 3 }));
    assert_eq!(ws.store().persons(), persons.as_slice());

    let err = pipeline()
        .execute(&mut ws, Command::DeletePersons { indices: vec![2, 2] })
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidField { field: "index", .. }));

    let err = pipeline()
        .execute(&mut ws, Command::DeletePersons { indices: Vec::new() })
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidIndex { .. }));
    assert_eq!(ws.store().persons().len(), 3);
}

#[test]
fn batch_delete_lists_deleted_in_display_order() {
    let mut ws = sample_workspace();
    let result = pipeline()
        .execute(&mut ws, Command::DeletePersons { indices: vec![3, 1] })
        .unwrap();
    assert!(result.feedback.starts_with("Deleted Person(s):\nAlex Yeoh;"));
    assert!(result.feedback.contains(",\nCharlotte Oliveiro;"));
    assert_eq!(ws.store().persons().len(), 4);
}

#[test]
fn sorting_twice_is_idempotent_and_descending_reverses_distinct_keys() {
    let mut ws = sample_workspace();
    let pipeline = pipeline();
    let sort = |direction| Command::SortPersons {
        field: SortField::Name,
        direction,
    };

    pipeline.execute(&mut ws, sort(SortDirection::Ascending)).unwrap();
    let once = visible_names(&ws);
    pipeline.execute(&mut ws, sort(SortDirection::Ascending)).unwrap();
    assert_eq!(visible_names(&ws), once);

    pipeline.execute(&mut ws, sort(SortDirection::Descending)).unwrap();
    let mut reversed = visible_names(&ws);
    reversed.reverse();
    assert_eq!(reversed, once);
}

#[test]
fn priority_sort_follows_configured_order_with_name_tie_break() {
    let persons = vec![
        person("Dan", "d@x.com", Priority::Medium),
        person("bea", "b@x.com", Priority::High),
        person("Abe", "a@x.com", Priority::High),
        person("Cid", "c@x.com", Priority::Low),
    ];
    let mut ws = Workspace::new(DomainStore::with_data(persons, Vec::new()).unwrap());
    let command = Command::SortPersons {
        field: SortField::Priority,
        direction: SortDirection::Ascending,
    };

    pipeline().execute(&mut ws, command.clone()).unwrap();
    assert_eq!(visible_names(&ws), vec!["Cid", "Dan", "Abe", "bea"]);

    let config = CoreConfig {
        priority_order: PriorityOrder::HighFirst,
        ..CoreConfig::default()
    };
    pipeline_with(config).execute(&mut ws, command).unwrap();
    assert_eq!(visible_names(&ws), vec!["Abe", "bea", "Dan", "Cid"]);
}

#[test]
fn indices_resolve_against_the_filtered_view() {
    let mut ws = sample_workspace();
    let pipeline = pipeline();

    let result = pipeline
        .execute(
            &mut ws,
            Command::FindPersons {
                keywords: vec!["li".to_string(), "royb@".to_string()],
            },
        )
        .unwrap();
    assert_eq!(result.feedback, "2 persons listed!");
    assert_eq!(visible_names(&ws), vec!["David Li", "Roy Balakrishnan"]);

    let shown = pipeline
        .execute(&mut ws, Command::ShowPersonProjects { index: 2 })
        .unwrap();
    assert_eq!(shown.action, Some(UiAction::SelectPerson { index: 1 }));
    assert_eq!(shown.feedback, "Showing projects for: Roy Balakrishnan");

    let err = pipeline
        .execute(&mut ws, Command::ShowPersonProjects { index: 3 })
        .unwrap_err();
    assert_eq!(err, CommandError::InvalidIndex { index: 3, visible: 2 });

    pipeline
        .execute(&mut ws, Command::DeletePersons { indices: vec![1] })
        .unwrap();
    assert!(ws.store().person("David Li").is_none());
    assert_eq!(visible_names(&ws), vec!["Roy Balakrishnan"]);

    pipeline.execute(&mut ws, Command::ListPersons).unwrap();
    assert_eq!(ws.person_view().len(), 5);
}

#[test]
fn tagging_merges_into_existing_tags() {
    let mut ws = sample_workspace();
    let tags: BTreeSet<String> = ["hackathon".to_string()].into_iter().collect();
    let result = pipeline()
        .execute(
            &mut ws,
            Command::TagPersons {
                indices: vec![1, 2],
                tags,
            },
        )
        .unwrap();
    assert!(result
        .feedback
        .starts_with("The specified person(s) now have the tag(s) [hackathon]:\n"));

    let alex = ws.store().person("Alex Yeoh").unwrap();
    assert!(alex.tags.contains("hackathon"));
    assert!(alex.tags.contains("friends"));
    assert!(ws.store().person("Bernice Yu").unwrap().tags.contains("hackathon"));
    assert!(!ws.store().person("David Li").unwrap().tags.contains("hackathon"));
}

#[test]
fn adding_a_duplicate_person_is_rejected() {
    let mut ws = sample_workspace();
    let twin = person("Alex Yeoh", "other@x.com", Priority::High);
    let err = pipeline().execute(&mut ws, Command::AddPerson(twin)).unwrap_err();
    assert!(matches!(err, CommandError::DuplicateEntity { .. }));
    assert_eq!(ws.store().person("Alex Yeoh").unwrap().email, "alexyeoh@example.com");
}
