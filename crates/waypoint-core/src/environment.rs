//! Push-time mapping from branches to deployment environments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::branch::{BranchCategory, BranchRef};
use crate::error::{Error, Result};

/// Deployment target tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
    Unknown,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
            Environment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "stage" => Ok(Environment::Stage),
            "prod" => Ok(Environment::Prod),
            "unknown" => Ok(Environment::Unknown),
            other => Err(format!("Unknown environment: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentDecision {
    pub environment: Environment,
    pub deploy: bool,
}

impl EnvironmentDecision {
    fn deploy_to(environment: Environment) -> Self {
        Self {
            environment,
            deploy: true,
        }
    }

    fn skip() -> Self {
        Self {
            environment: Environment::Unknown,
            deploy: false,
        }
    }
}

/// Resolve the target environment for a push of `head` towards `base`.
///
/// Hotfix branches deploy to prod only when based on `main`; any other
/// hotfix stays `unknown` with deploy disabled. Fails when `sha` is empty.
pub fn resolve_environment(
    head: &BranchRef,
    base: &BranchRef,
    sha: &str,
) -> Result<EnvironmentDecision> {
    if sha.is_empty() {
        return Err(Error::MissingRequiredField("sha"));
    }

    let decision = match head.category() {
        BranchCategory::Feature | BranchCategory::Fix => {
            EnvironmentDecision::deploy_to(Environment::Dev)
        }
        BranchCategory::Staging => EnvironmentDecision::deploy_to(Environment::Stage),
        BranchCategory::Main => EnvironmentDecision::deploy_to(Environment::Prod),
        BranchCategory::Hotfix => {
            if base.is_main() {
                info!("Environment set to prod for hotfix branch");
                EnvironmentDecision::deploy_to(Environment::Prod)
            } else {
                warn!("Hotfix branches are allowed only when merging into main");
                EnvironmentDecision::skip()
            }
        }
        BranchCategory::Other => EnvironmentDecision::skip(),
    };

    Ok(decision)
}
