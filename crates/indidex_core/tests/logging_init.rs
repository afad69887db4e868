use indidex_core::{
    init_logging, logging_status, Command, CommandPipeline, DomainStore, LogLevel, SortDirection,
    SortField, Workspace,
};

#[test]
fn command_events_are_written_to_the_log_dir() {
    let dir = tempfile::tempdir().unwrap();
    init_logging("debug", dir.path()).unwrap();
    assert_eq!(logging_status().unwrap().0, LogLevel::Debug);

    let mut ws = Workspace::new(DomainStore::new());
    let pipeline = CommandPipeline::default();
    let _ = pipeline.execute(&mut ws, Command::DeletePersons { indices: vec![1] });
    pipeline
        .execute(
            &mut ws,
            Command::SortPersons {
                field: SortField::Name,
                direction: SortDirection::Descending,
            },
        )
        .unwrap();
    log::logger().flush();

    let contents: String = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("indidex"))
        .map(|entry| std::fs::read_to_string(entry.path()).unwrap_or_default())
        .collect();
    assert!(contents.contains("event=logging_init"));
    assert!(contents.contains("event=command_execute module=pipeline status=error command=delete"));
    assert!(contents.contains("error_code=invalid_index"));
    assert!(contents.contains("status=start command=delete mutating=true"));
    let sort_event = "event=persons_sort module=pipeline status=start field=name direction=desc";
    assert!(contents.contains(sort_event));
}
