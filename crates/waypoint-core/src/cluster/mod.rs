//! Cluster access for image tag reconciliation.

pub mod kubectl;
pub mod reconcile;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use kubectl::KubectlClient;
pub use reconcile::{ReconcileReport, reconcile_tag};

/// Tag assumed when an image reference carries none.
pub const DEFAULT_TAG: &str = "latest";

/// A container as declared in a deployment's pod template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub image: String,
}

impl Container {
    /// Tag after the last `:`, or `latest` when there is none.
    pub fn tag(&self) -> &str {
        match self.image.rsplit_once(':') {
            Some((_, tag)) => tag,
            None => DEFAULT_TAG,
        }
    }

    /// Image reference without its tag.
    pub fn repository(&self) -> &str {
        match self.image.rsplit_once(':') {
            Some((repo, _)) => repo,
            None => &self.image,
        }
    }

    /// Image reference retagged to `tag`.
    pub fn image_with_tag(&self, tag: &str) -> String {
        format!("{}:{}", self.repository(), tag)
    }
}

/// Narrow read/write interface to live cluster deployments.
pub trait DeploymentClient {
    /// Read the containers of `deployment` in `namespace`.
    fn containers(&self, namespace: &str, deployment: &str) -> Result<Vec<Container>>;

    /// Point one container of `deployment` at `image`.
    fn set_image(
        &self,
        namespace: &str,
        deployment: &str,
        container: &str,
        image: &str,
    ) -> Result<()>;
}
