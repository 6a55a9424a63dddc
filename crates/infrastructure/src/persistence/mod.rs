//! File-backed adapters for the storage and file system ports.

mod collection_storage;
mod environment_storage;
mod file_system;

pub use collection_storage::FileCollectionStorage;
pub use environment_storage::FileEnvironmentStorage;
pub use file_system::TokioFileSystem;
