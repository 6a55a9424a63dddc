//! Environment inheritance.
//!
//! An environment may name a parent; the effective variables are the merge of
//! the whole chain, nearer environments overriding farther ones.

use std::collections::BTreeMap;

use crate::property::PropertyList;

/// Maximum number of environments visited when following parent links.
pub const MAX_ENVIRONMENT_DEPTH: usize = 10;

/// A named set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Environment name.
    pub name: String,
    /// Name of the environment this one inherits from.
    pub parent: Option<String>,
    /// Variable values.
    pub values: PropertyList,
}

impl Environment {
    /// Creates an environment without a parent.
    #[must_use]
    pub fn new(name: impl Into<String>, values: PropertyList) -> Self {
        Self {
            name: name.into(),
            parent: None,
            values,
        }
    }

    /// Sets the parent environment.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Environments keyed by name.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSet {
    environments: BTreeMap<String, Environment>,
}

impl EnvironmentSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            environments: BTreeMap::new(),
        }
    }

    /// Adds or replaces an environment.
    pub fn insert(&mut self, environment: Environment) {
        self.environments
            .insert(environment.name.clone(), environment);
    }

    /// Returns an environment by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    /// Returns the environments visited from `name`, nearest
    /// first.
    ///
    /// The walk stops at a missing environment, a repeated name, or after
    /// [`MAX_ENVIRONMENT_DEPTH`] steps.
    #[must_use]
    pub fn chain(&self, name: &str) -> Vec<&Environment> {
        let mut chain: Vec<&Environment> = Vec::new();
        let mut current = Some(name);
        while let Some(env_name) = current {
            if chain.len() == MAX_ENVIRONMENT_DEPTH || chain.iter().any(|e| e.name == env_name) {
                break;
            }
            let Some(environment) = self.environments.get(env_name) else {
                break;
            };
            chain.push(environment);
            current = environment.parent.as_deref();
        }
        chain
    }

    /// Returns the effective variables of `name`, or `None` if it does not
    /// exist.
    #[must_use]
    pub fn merged(&self, name: &str) -> Option<PropertyList> {
        let chain = self.chain(name);
        if chain.is_empty() {
            return None;
        }
        let mut merged = PropertyList::new();
        for environment in chain.iter().rev() {
            merged.add_all(&environment.values);
        }
        Some(merged)
    }
}

impl FromIterator<Environment> for EnvironmentSet {
    fn from_iter<I: IntoIterator<Item = Environment>>(iter: I) -> Self {
        let mut set = Self::new();
        for environment in iter {
            set.insert(environment);
        }
        set
    }
}
