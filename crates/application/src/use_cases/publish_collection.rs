//! Publish collection use case.

use satchel_domain::{Collection, CollectionId};
use tracing::info;

use crate::ApplicationResult;
use crate::ports::CollectionApi;

/// Result of publishing a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Id of the remote collection.
    pub id: CollectionId,
    /// True if a new remote collection was created.
    pub created: bool,
}

/// Use case for uploading a collection to the remote API.
///
/// Collections with a remote id are updated in place; others are created and
/// receive the id assigned by the service.
pub struct PublishCollection<A: CollectionApi> {
    api: A,
}

impl<A: CollectionApi> PublishCollection<A> {
    /// Creates a new `PublishCollection` use case.
    #[must_use]
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Creates or updates `collection` remotely and records its id.
    ///
    /// `workspace` is only used when a new collection is created.
    ///
    /// # Errors
    ///
    /// Propagates API failures; the collection is not modified on error.
    pub async fn execute(
        &self,
        collection: &mut Collection,
        workspace: Option<&str>,
    ) -> ApplicationResult<PublishOutcome> {
        let outcome = match collection.postman_id() {
            Some(id) => PublishOutcome {
                id: self.api.update(id, collection).await?,
                created: false,
            },
            None => PublishOutcome {
                id: self.api.create(collection, workspace).await?,
                created: true,
            },
        };
        collection.set_postman_id(outcome.id.clone());
        info!(
            id = %outcome.id,
            created = outcome.created,
            name = collection.name(),
            "published collection"
        );
        Ok(outcome)
    }
}
