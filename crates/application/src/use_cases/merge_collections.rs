//! Merge collections use case.

use satchel_domain::{Collection, CollectionElement, DomainError, ElementId, ItemGroup};
use tracing::info;

use crate::ApplicationResult;

/// Options controlling how a collection is merged into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Name of the folder receiving the merged collection; the root when `None`.
    pub parent_folder: Option<String>,
    /// Attach the merged collection's scripts to the new folder.
    pub copy_scripts: bool,
    /// Copy the merged collection's variables into the target.
    pub copy_variables: bool,
}

/// Use case for merging one collection into another as a folder.
#[derive(Debug, Default)]
pub struct MergeCollections {
    options: MergeOptions,
}

impl MergeCollections {
    /// Creates a new `MergeCollections` use case.
    #[must_use]
    pub const fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Moves the content of `other` into `target`, returning the id of the
    /// folder created for it.
    ///
    /// # Errors
    ///
    /// Returns a domain `NotFound` error if the configured parent folder does
    /// not exist in `target`.
    pub fn execute(&self, target: &mut Collection, other: Collection) -> ApplicationResult<ElementId> {
        let parent = match self.options.parent_folder.as_deref() {
            Some(name) => target
                .get_folder(name)
                .map(CollectionElement::id)
                .ok_or_else(|| DomainError::NotFound(name.to_owned()))?,
            None => target.id(),
        };
        let merged_name = other.name().to_owned();
        let merged_requests = other.request_count();
        let folder = target.add_collection(
            other,
            parent,
            self.options.copy_scripts,
            self.options.copy_variables,
        )?;
        info!(
            target = target.name(),
            merged = %merged_name,
            requests = merged_requests,
            "merged collection"
        );
        Ok(folder)
    }
}
