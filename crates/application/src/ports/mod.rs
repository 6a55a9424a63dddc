//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod collection_api;
mod file_system;
mod script_runner;
mod storage;

pub use collection_api::CollectionApi;
pub use file_system::{FileSystem, FileSystemError};
pub use script_runner::ScriptRunner;
pub use storage::{CollectionStorage, EnvironmentStorage};
