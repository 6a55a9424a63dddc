//! File-backed environment storage.

use std::path::Path;

use satchel_application::ApplicationResult;
use satchel_application::ports::{EnvironmentStorage, FileSystem};
use satchel_domain::Environment;
use tracing::info;

use super::collection_storage::not_found;
use crate::codec::{parse_environment, render_environment};

/// Stores environments as JSON documents through a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct FileEnvironmentStorage<F> {
    fs: F,
}

impl<F: FileSystem> FileEnvironmentStorage<F> {
    /// Creates a new storage over the given file system.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> EnvironmentStorage for FileEnvironmentStorage<F> {
    async fn save(&self, environment: &Environment, path: &Path) -> ApplicationResult<()> {
        let json = render_environment(environment)?;
        self.fs.write_file(path, json.as_bytes()).await?;
        info!(path = %path.display(), name = %environment.name, "wrote environment");
        Ok(())
    }

    async fn load(&self, path: &Path) -> ApplicationResult<Environment> {
        let content = self.fs.read_file_string(path).await.map_err(not_found)?;
        Ok(parse_environment(&content)?)
    }
}
