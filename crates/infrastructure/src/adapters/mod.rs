//! Adapters for external services.

mod postman_client;

pub use postman_client::{
    PostmanApiClient, build_envelope, extract_collection_id, interpret_status,
};
