//! Application use cases (business logic orchestration).

mod fetch_collection;
mod load_collection;
mod merge_collections;
mod publish_collection;
mod resolve_request;
mod run_scripts;
mod save_collection;

pub use fetch_collection::*;
pub use load_collection::*;
pub use merge_collections::*;
pub use publish_collection::*;
pub use resolve_request::*;
pub use run_scripts::*;
pub use save_collection::*;
