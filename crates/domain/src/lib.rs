//! Satchel Domain - Postman collection object model
//!
//! This crate defines the in-memory model of a Postman v2.1 collection: the
//! item tree, its property containers, URLs, bodies, auth and scripts.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod cookie;
pub mod element;
pub mod environment;
pub mod error;
pub mod event;
pub mod id;
pub mod property;
pub mod request;
pub mod response;
pub mod scripting;
pub mod token;
pub mod url;

pub use collection::{
    Collection, CollectionInfo, DEFAULT_COLLECTION_NAME, Folder, Item, ItemGroup, ItemKind,
    ItemList, Request,
};
pub use cookie::Cookie;
pub use element::{CollectionElement, DEFAULT_COLLECTION_SCHEMA, VALIDATION_SCHEMA};
pub use environment::{Environment, EnvironmentSet, MAX_ENVIRONMENT_DEPTH};
pub use error::{DomainError, DomainResult};
pub use event::{Event, EventType, Events, SCRIPT_TYPE};
pub use id::{CollectionId, ElementId};
pub use property::{BOOLEAN_TYPE, Property, PropertyList};
pub use request::{
    AuthType, BodyElement, BodyMode, BodyPayload, GraphqlPayload, HttpMethod, RawLanguage,
    RequestAuth, RequestBody,
};
pub use response::Response;
pub use scripting::{ScriptReport, ScriptSource};
pub use token::{resolve_tokens, token_names};
pub use url::{Protocol, Url};
