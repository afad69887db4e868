//! In-memory storage: identity-keyed collections, live views and the domain store.
//!
//! # Responsibility
//! - Hold persons and projects behind a single mutation boundary.
//! - Push every committed change to attached views synchronously.
//! - Convert to and from plain records at the persistence boundary.
//!
//! # Invariants
//! - Callers outside this module never mutate a collection directly.

pub mod domain_store;
pub mod snapshot;
pub mod unique_collection;
pub mod view;
