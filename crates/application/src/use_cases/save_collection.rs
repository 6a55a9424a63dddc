//! Save collection use case.

use std::path::Path;

use satchel_domain::Collection;
use tracing::info;

use crate::ApplicationResult;
use crate::ports::CollectionStorage;

/// Use case for writing a collection document to storage.
pub struct SaveCollection<S: CollectionStorage> {
    storage: S,
}

impl<S: CollectionStorage> SaveCollection<S> {
    /// Creates a new `SaveCollection` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Saves `collection` to `path`, replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or written.
    pub async fn execute(&self, collection: &Collection, path: &Path) -> ApplicationResult<()> {
        self.storage.save(collection, path).await?;
        info!(path = %path.display(), name = collection.name(), "saved collection");
        Ok(())
    }
}
