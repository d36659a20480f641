//! Deployment selection for manual reset and rollback flows.

use tracing::info;

use crate::config::{Deployment, EnvironmentConfig};
use crate::environment::Environment;

/// Parsed reset selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetSelector {
    /// `All`: stage then dev
    All,
    /// `All stage`
    AllStage,
    /// `All dev`
    AllDev,
    /// Any other literal, matched against deployment namespaces
    Namespace(String),
}

impl ResetSelector {
    pub fn parse(input: &str) -> Self {
        match input {
            "All" => ResetSelector::All,
            "All stage" => ResetSelector::AllStage,
            "All dev" => ResetSelector::AllDev,
            other => ResetSelector::Namespace(other.to_string()),
        }
    }
}

/// Resolve a reset selector into deployment records.
///
/// A namespace literal is matched against every environment in document
/// order and every match is kept. An unmatched selector yields nothing.
pub fn select_for_reset<'a>(config: &'a EnvironmentConfig, selector: &str) -> Vec<&'a Deployment> {
    let stage = Environment::Stage.as_str();
    let dev = Environment::Dev.as_str();

    let deployments: Vec<&Deployment> = match ResetSelector::parse(selector) {
        ResetSelector::All => config
            .deployments(stage)
            .iter()
            .chain(config.deployments(dev))
            .collect(),
        ResetSelector::AllStage => config.deployments(stage).iter().collect(),
        ResetSelector::AllDev => config.deployments(dev).iter().collect(),
        ResetSelector::Namespace(namespace) => config
            .iter()
            .flat_map(|(_, env)| env.deployments.iter())
            .filter(|d| d.namespace() == namespace)
            .collect(),
    };

    info!("Selected environment: {}", selector);
    info!("Found {} deployment(s)", deployments.len());
    deployments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fixed_vocabulary() {
        assert_eq!(ResetSelector::parse("All"), ResetSelector::All);
        assert_eq!(ResetSelector::parse("All stage"), ResetSelector::AllStage);
        assert_eq!(ResetSelector::parse("All dev"), ResetSelector::AllDev);
        assert_eq!(
            ResetSelector::parse("all"),
            ResetSelector::Namespace("all".to_string())
        );
    }
}
