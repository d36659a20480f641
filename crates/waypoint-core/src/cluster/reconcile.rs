//! Converge a live deployment's container images to a desired tag.

use serde::Serialize;
use tracing::info;

use super::DeploymentClient;
use crate::error::Result;
use crate::event::require;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Whether any container image was changed
    pub updated: bool,
    /// Names of the containers that were retagged
    pub updated_containers: Vec<String>,
}

#[derive(Serialize)]
struct ReconcileOutput {
    #[serde(rename = "imageUpdated")]
    image_updated: String,
}

impl ReconcileReport {
    /// `{"imageUpdated":"true"}` or `{"imageUpdated":"false"}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&ReconcileOutput {
            image_updated: self.updated.to_string(),
        })?)
    }
}

/// Retag every container of `deployment` whose tag differs from `desired_tag`.
///
/// Containers already on the desired tag are left alone, so a second call
/// with the same tag writes nothing. The first failed write aborts.
pub fn reconcile_tag(
    client: &dyn DeploymentClient,
    namespace: &str,
    deployment: &str,
    desired_tag: &str,
) -> Result<ReconcileReport> {
    require("namespace", namespace)?;
    require("deployment", deployment)?;
    require("env_tag", desired_tag)?;

    let mut report = ReconcileReport::default();

    for container in client.containers(namespace, deployment)? {
        let current_tag = container.tag();
        if current_tag == desired_tag {
            info!(
                "Container {} already uses tag {}",
                container.name, desired_tag
            );
            continue;
        }

        info!(
            "Updating container {}: current tag {} -> new tag {}",
            container.name, current_tag, desired_tag
        );
        let image = container.image_with_tag(desired_tag);
        client.set_image(namespace, deployment, &container.name, &image)?;
        info!("Updated image for container {} to {}", container.name, image);

        report.updated = true;
        report.updated_containers.push(container.name);
    }

    Ok(report)
}
