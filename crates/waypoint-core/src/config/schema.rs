//! Configuration schema for the environment document
//!
//! ```json
//! {
//!   "environments": {
//!     "dev": { "deployments": [{ "project": "alice", "namespace": "dev-alice" }] }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of the environment document.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EnvironmentConfig {
    /// Environments in document order
    #[serde(default)]
    pub environments: IndexMap<String, EnvironmentSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EnvironmentSpec {
    #[serde(default)]
    pub deployments: Vec<Deployment>,
}

/// A deployment record, kept exactly as written in the document.
///
/// Only `project` and `namespace` are interpreted, and only when they are
/// strings; every key keeps its value and position on output.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct Deployment(Map<String, Value>);

impl EnvironmentConfig {
    /// Deployments configured for `environment`; empty when it is absent.
    pub fn deployments(&self, environment: &str) -> &[Deployment] {
        self.environments
            .get(environment)
            .map(|env| env.deployments.as_slice())
            .unwrap_or_default()
    }

    /// Iterate environments in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvironmentSpec)> {
        self.environments
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }
}

impl Deployment {
    pub fn project(&self) -> &str {
        self.str_field("project")
    }

    pub fn namespace(&self) -> &str {
        self.str_field("namespace")
    }

    /// Raw value of any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Deployment {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
