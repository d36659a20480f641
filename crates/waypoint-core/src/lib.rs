//! Waypoint Core Library
//!
//! Branch policy and deployment resolution for CI/CD pipelines: PR
//! legality, environment and image tag derivation, deployment selection
//! and reconciliation of live container image tags.

pub mod branch;
pub mod cluster;
pub mod config;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod event;
pub mod notify;
pub mod plan;
pub mod policy;
pub mod tags;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Branches
    pub use crate::branch::{BranchCategory, BranchRef, Classification};

    // Configuration
    pub use crate::config::{Deployment, EnvironmentConfig, load_config, parse_config_str};

    // Resolution
    pub use crate::environment::{Environment, EnvironmentDecision, resolve_environment};
    pub use crate::event::{PipelineEvent, read_dispatch_input};
    pub use crate::plan::{ResolvedPlan, resolve_plan};
    pub use crate::policy::{PolicyVerdict, validate_pr};
    pub use crate::tags::{TagPair, generate_tags};

    // Deployments
    pub use crate::deploy::{
        BuildMatrix, DispatchInput, ResetSelector, build_matrix, resolve_namespace,
        select_deployments, select_for_reset,
    };

    // Cluster
    pub use crate::cluster::{
        Container, DeploymentClient, KubectlClient, ReconcileReport, reconcile_tag,
    };

    pub use crate::error::{Error, Result};
}
