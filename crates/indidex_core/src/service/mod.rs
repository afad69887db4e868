//! Command layer over the domain store.
//!
//! # Responsibility
//! - Turn typed command intents into validated store mutations.
//! - Keep UI hosts decoupled from store internals.

pub mod clock;
pub mod command;
pub mod pipeline;
pub mod predicate;
pub mod sort;
pub mod workspace;
