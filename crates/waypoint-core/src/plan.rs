//! Deployment plan resolution for push and dispatch events.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Deployment, EnvironmentConfig};
use crate::deploy::{BuildMatrix, build_matrix, needs_utils, resolve_namespace, select_deployments};
use crate::environment::{Environment, resolve_environment};
use crate::error::Result;
use crate::event::PipelineEvent;

/// Everything downstream orchestration needs for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlan {
    pub environment: Environment,
    pub deploy: bool,
    pub deployments: Vec<Deployment>,
    pub tag_suffix: String,
    pub tag_sha: String,
    pub namespace: String,
    pub build_matrix: BuildMatrix,
    pub needs_utils: bool,
    pub db_migration_submodule: bool,
}

/// Resolve `event` against `config`.
///
/// Deployment records are cloned from `config` as-is.
pub fn resolve_plan(event: &PipelineEvent, config: &EnvironmentConfig) -> Result<ResolvedPlan> {
    debug!(
        repo = %event.repo_name,
        head = %event.head,
        base = %event.base,
        sha = %event.sha,
        "Resolving plan"
    );

    let decision = resolve_environment(&event.head, &event.base, &event.sha)?;
    let project = event.project().unwrap_or_default();

    let selected = select_deployments(config, decision.environment, Some(project));
    let namespace = resolve_namespace(selected.iter().copied(), project);
    let deployments: Vec<Deployment> = selected.into_iter().cloned().collect();

    let tag_suffix = if project.is_empty() {
        decision.environment.to_string()
    } else {
        format!("{}-{}", decision.environment, project)
    };

    let plan = ResolvedPlan {
        environment: decision.environment,
        deploy: decision.deploy,
        deployments,
        tag_suffix,
        tag_sha: event.sha.clone(),
        namespace,
        build_matrix: build_matrix(&event.repo_name),
        needs_utils: needs_utils(&event.repo_name),
        db_migration_submodule: true,
    };

    info!(
        "Resolved environment={} deploy={} deployments={}",
        plan.environment,
        plan.deploy,
        plan.deployments.len()
    );
    Ok(plan)
}

impl ResolvedPlan {
    /// Render as `key=value` lines; structured values are JSON-encoded.
    pub fn to_output_lines(&self) -> Result<Vec<String>> {
        let deployment_list = serde_json::to_string(&self.deployments)?;
        let build_matrix = serde_json::to_string(&self.build_matrix)?;

        Ok(vec![
            format!("proceed={}", self.deploy),
            format!("deploy={}", self.deploy),
            format!("environment={}", self.environment),
            format!("deployment_list={deployment_list}"),
            format!("tag_suffix={}", self.tag_suffix),
            format!("tag_sha={}", self.tag_sha),
            format!("build_matrix={build_matrix}"),
            "docker_labels=".to_string(),
            format!("namespace={}", self.namespace),
            format!("needs_utils={}", self.needs_utils),
            format!("db_migration_submodule={}", self.db_migration_submodule),
        ])
    }
}
