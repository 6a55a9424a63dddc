//! The item tree: folders, requests and the collection root.

mod document;
mod group;
mod item;

pub use document::{Collection, CollectionInfo, DEFAULT_COLLECTION_NAME};
pub use group::{ItemGroup, ItemList};
pub use item::{Folder, Item, ItemKind, Request};
