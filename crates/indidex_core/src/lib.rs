//! Core domain logic for IndiDex.
//! This crate is the single source of truth for person/project invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError};
pub use model::identity::{EntityKind, Identified};
pub use model::person::{Person, PersonValidationError, Socials};
pub use model::priority::{Priority, PriorityOrder};
pub use model::project::{MembershipError, Project, ProjectValidationError};
pub use service::clock::{Clock, FixedClock, SystemClock};
pub use service::command::{Command, CommandResult, PersonEdit, ProjectEdit, UiAction};
pub use service::pipeline::{CommandError, CommandPipeline, PipelineResult};
pub use service::sort::{SortDirection, SortField};
pub use service::workspace::Workspace;
pub use store::domain_store::{DomainStore, StoreError, StoreResult};
pub use store::snapshot::{PersonRecord, ProjectRecord, SnapshotError, StoreSnapshot};
pub use store::view::FilteredSortedView;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
