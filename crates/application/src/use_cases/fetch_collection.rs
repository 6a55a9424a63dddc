//! Fetch collection use case.

use satchel_domain::{Collection, CollectionId};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::CollectionApi;

/// Use case for downloading a collection from the remote API.
pub struct FetchCollection<A: CollectionApi> {
    api: A,
}

impl<A: CollectionApi> FetchCollection<A> {
    /// Creates a new `FetchCollection` use case.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetches the collection with `id`.
    ///
    /// The returned collection always carries `id` as its remote id, so a later
    /// publish updates it in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::NotFound`] for an unknown id and
    /// propagates any other API failure.
    pub async fn execute(&self, id: &CollectionId) -> ApplicationResult<Collection> {
        let mut collection = self.api.fetch(id).await?;
        if collection.postman_id().is_none() {
            collection.set_postman_id(id.clone());
        }
        info!(%id, name = collection.name(), "fetched collection");
        Ok(collection)
    }
}
