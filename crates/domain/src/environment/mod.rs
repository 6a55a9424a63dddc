//! Named variable sets that can inherit from a parent set.

mod chain;

pub use chain::{Environment, EnvironmentSet, MAX_ENVIRONMENT_DEPTH};
