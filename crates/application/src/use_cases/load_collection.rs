//! Load collection use case.

use std::path::Path;

use satchel_domain::{Collection, ItemGroup, ItemKind};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::CollectionStorage;

/// Use case for loading a collection document from storage.
pub struct LoadCollection<S: CollectionStorage> {
    storage: S,
}

impl<S: CollectionStorage> LoadCollection<S> {
    /// Creates a new `LoadCollection` use case.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads the collection stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or decoded.
    pub async fn execute(&self, path: &Path) -> ApplicationResult<Collection> {
        let collection = self.storage.load(path).await?;
        info!(
            path = %path.display(),
            name = collection.name(),
            folders = collection.get_items(Some(ItemKind::Folder)).len(),
            requests = collection.request_count(),
            "loaded collection"
        );
        Ok(collection)
    }
}
