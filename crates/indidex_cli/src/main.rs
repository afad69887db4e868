//! CLI smoke entry point.
//!
//! # Responsibility
//! - Seed the sample address book and drive a few commands through the pipeline.
//! - Keep output deterministic apart from the seeded deadline.
//!
//! Set `INDIDEX_LOG_DIR` to an absolute path to capture core logs.

use indidex_core::model::sample::{sample_persons, sample_project};
use indidex_core::{
    init_logging, Clock, Command, CommandPipeline, CoreConfig, DomainStore, LogLevel,
    SortDirection, SortField, SystemClock, Workspace,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(dir) = std::env::var_os("INDIDEX_LOG_DIR").map(PathBuf::from) {
        if let Err(err) = init_logging(LogLevel::build_default().as_str(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let config = CoreConfig::default();
    let today = SystemClock.today();
    let project = match sample_project(today, config.due_soon_days) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("sample project invalid: {err}");
            return ExitCode::FAILURE;
        }
    };
    let store = match DomainStore::with_data(sample_persons(), vec![project]) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("sample data invalid: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut workspace = Workspace::new(store);
    let pipeline = CommandPipeline::new(config);
    let commands = vec![
        Command::SortPersons {
            field: SortField::Priority,
            direction: SortDirection::Descending,
        },
        Command::JoinProject {
            name: "Orientation Camp".to_string(),
            member_indices: vec![1],
        },
        Command::ShowPersonProjects { index: 1 },
        Command::DueSoon,
        Command::DeletePersons {
            indices: vec![1, 1, 999],
        },
    ];

    println!("indidex_core version={}", indidex_core::core_version());
    for command in commands {
        let word = command.word();
        match pipeline.execute(&mut workspace, command) {
            Ok(result) => println!("[{word}] ok: {}", result.feedback),
            Err(err) if err.is_fatal() => {
                eprintln!("[{word}] fatal: {err}");
                return ExitCode::FAILURE;
            }
            Err(err) => println!("[{word}] rejected: {err}"),
        }
    }
    println!(
        "persons={} projects={}",
        workspace.person_view().len(),
        workspace.project_view().len()
    );
    ExitCode::SUCCESS
}
