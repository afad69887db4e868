//! Domain model for persons, projects and their membership relation.
//!
//! # Responsibility
//! - Define canonical value types used by the store and command pipeline.
//! - Keep identity rules (`Identified`) separate from full value equality.
//!
//! # Invariants
//! - Persons and projects are identified by name.
//! - Projects reference persons by identity key only; there is no back-pointer.

pub mod identity;
pub mod person;
pub mod priority;
pub mod project;
pub mod sample;
