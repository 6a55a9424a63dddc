//! Satchel Application - ports and use cases
//!
//! The use cases orchestrate the collection model against external
//! collaborators (remote collection API, script runner, storage) that are
//! described here as ports and implemented in the infrastructure crate.

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
