//! Deterministic JSON rendering for collection documents.
//!
//! Documents are written with 2-space indentation and a trailing newline,
//! keeping object keys in the order the encoder emits them, so that saved
//! files produce clean diffs.

mod json;

pub use json::*;
