//! Common capabilities of every node in a collection document.

use crate::error::DomainResult;
use crate::id::ElementId;

/// Schema URI written into new collections.
pub const DEFAULT_COLLECTION_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Published JSON-Schema used when validating documents.
pub const VALIDATION_SCHEMA: &str =
    "https://schema.postman.com/collection/json/v2.1.0/draft-07/collection.json";

/// A node of the collection object model.
pub trait CollectionElement {
    /// Process-local identity of this node.
    fn id(&self) -> ElementId;

    /// The discriminator used for lookup and removal inside a container.
    ///
    /// Elements that are never looked up by key return `None`.
    fn key(&self) -> Option<&str>;

    /// Validates this element against [`VALIDATION_SCHEMA`].
    ///
    /// Schema validation is not performed; every element is reported valid.
    ///
    /// # Errors
    ///
    /// Never fails at present.
    fn validate(&self) -> DomainResult<bool> {
        Ok(true)
    }
}
