//! Remote collection API port.

use std::future::Future;

use satchel_domain::{Collection, CollectionId};

use crate::ApplicationResult;

/// Access to a remote collection-management service.
pub trait CollectionApi: Send + Sync {
    /// Fetches a collection by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] for an unknown id, or
    /// [`crate::ApplicationError::Api`] with the response body for any other
    /// unsuccessful status.
    fn fetch(&self, id: &CollectionId)
    -> impl Future<Output = ApplicationResult<Collection>> + Send;

    /// Creates a collection, optionally inside a workspace, returning the id
    /// assigned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Api`] if the service rejects the document.
    fn create(
        &self,
        collection: &Collection,
        workspace: Option<&str>,
    ) -> impl Future<Output = ApplicationResult<CollectionId>> + Send;

    /// Replaces an existing collection.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] for an unknown id, or
    /// [`crate::ApplicationError::Api`] for any other unsuccessful status.
    fn update(
        &self,
        id: &CollectionId,
        collection: &Collection,
    ) -> impl Future<Output = ApplicationResult<CollectionId>> + Send;
}
