//! Satchel Infrastructure - adapters and implementations
//!
//! This crate provides the collection document codec and the concrete
//! implementations of the ports defined in the application layer: file
//! storage and the remote collection API client.

pub mod adapters;
pub mod codec;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::PostmanApiClient;
pub use codec::{
    CodecError, CodecResult, DecodeWarning, Decoded, ToJson, ValidationReport, WarningSeverity,
    decode_collection, decode_collection_value, parse_collection, parse_environment, parse_item,
    render_collection, render_environment, validate_document,
};
pub use config::{ConfigError, PostmanApiConfig};
pub use persistence::{FileCollectionStorage, FileEnvironmentStorage, TokioFileSystem};
pub use serialization::{SerializationError, from_json, to_json_stable};
