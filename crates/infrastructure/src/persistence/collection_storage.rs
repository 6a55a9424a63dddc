//! File-backed collection storage.
//!
//! A collection is stored as a single v2.1 document; writes go through the
//! stable renderer so that saved files diff cleanly.

use std::path::Path;

use satchel_application::ports::{CollectionStorage, FileSystem, FileSystemError};
use satchel_application::{ApplicationError, ApplicationResult};
use satchel_domain::Collection;
use tracing::{debug, info};

use crate::codec::{decode_collection, render_collection};

/// Stores collections as JSON documents through a [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct FileCollectionStorage<F> {
    fs: F,
}

impl<F: FileSystem> FileCollectionStorage<F> {
    /// Creates a new storage over the given file system.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }
}

pub(super) fn not_found(err: FileSystemError) -> ApplicationError {
    match err {
        FileSystemError::NotFound(path) => ApplicationError::NotFound(path.display().to_string()),
        other => ApplicationError::FileSystem(other),
    }
}

impl<F: FileSystem> CollectionStorage for FileCollectionStorage<F> {
    async fn save(&self, collection: &Collection, path: &Path) -> ApplicationResult<()> {
        let json = render_collection(collection)?;
        self.fs.write_file(path, json.as_bytes()).await?;
        info!(path = %path.display(), bytes = json.len(), "wrote collection");
        Ok(())
    }

    async fn load(&self, path: &Path) -> ApplicationResult<Collection> {
        let content = self.fs.read_file_string(path).await.map_err(not_found)?;
        let decoded = decode_collection(&content)?;
        debug!(
            path = %path.display(),
            warnings = decoded.warnings.len(),
            "read collection"
        );
        Ok(decoded.collection)
    }
}
