//! Environment deployment selection for dispatch targeting.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::config::{Deployment, EnvironmentConfig};
use crate::environment::Environment;
use crate::error::{Error, Result};

static DISPATCH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:dev|stage|prod)-(.+)$").expect("dispatch pattern is valid")
});

/// A manual dispatch target of the form `<env>-<project>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchInput {
    /// The raw selector, e.g. `stage-alice`
    pub environment_selector: String,
    pub project: String,
}

impl DispatchInput {
    pub fn parse(input: &str) -> Result<Self> {
        let caps = DISPATCH_PATTERN
            .captures(input)
            .ok_or_else(|| Error::InvalidDispatchInput(input.to_string()))?;

        let parsed = Self {
            environment_selector: input.to_string(),
            project: caps[1].to_string(),
        };
        info!(
            "Parsed dispatch target: environment_selector={}, project={}",
            parsed.environment_selector, parsed.project
        );
        Ok(parsed)
    }
}

/// Deployments of `environment`, narrowed to `project` when one is given.
pub fn select_deployments<'a>(
    config: &'a EnvironmentConfig,
    environment: Environment,
    project: Option<&str>,
) -> Vec<&'a Deployment> {
    let all = config.deployments(environment.as_str());
    match project.filter(|p| !p.is_empty()) {
        Some(project) => all.iter().filter(|d| d.project() == project).collect(),
        None => all.iter().collect(),
    }
}

/// Namespace of the first deployment belonging to `project`.
///
/// Returns an empty string when `project` is empty or nothing matches.
pub fn resolve_namespace<'a, I>(deployments: I, project: &str) -> String
where
    I: IntoIterator<Item = &'a Deployment>,
{
    if project.is_empty() {
        return String::new();
    }
    deployments
        .into_iter()
        .find(|d| d.project() == project)
        .map(|d| d.namespace().to_string())
        .unwrap_or_default()
}
