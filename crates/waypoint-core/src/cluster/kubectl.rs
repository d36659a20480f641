//! `kubectl`-backed deployment client.

use std::path::PathBuf;
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, error};

use super::{Container, DeploymentClient};
use crate::error::{Error, Result};

/// Shells out to `kubectl` using the ambient kubeconfig.
#[derive(Debug, Clone)]
pub struct KubectlClient {
    program: PathBuf,
}

impl Default for KubectlClient {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl KubectlClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("{} {}", self.program.display(), args.join(" "));
        debug!("Running {}", command);

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|e| Error::ExternalCommand {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Command failed: {}\n{}", command, stderr);
            return Err(Error::ExternalCommand { command, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl DeploymentClient for KubectlClient {
    fn containers(&self, namespace: &str, deployment: &str) -> Result<Vec<Container>> {
        let json = self.run(&["get", "deployment", deployment, "-n", namespace, "-o", "json"])?;
        parse_containers(&json)
    }

    fn set_image(
        &self,
        namespace: &str,
        deployment: &str,
        container: &str,
        image: &str,
    ) -> Result<()> {
        let target = format!("deployment/{deployment}");
        let assignment = format!("{container}={image}");
        self.run(&["set", "image", &target, "-n", namespace, &assignment])?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentObject {
    #[serde(default)]
    spec: DeploymentSpec,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentSpec {
    #[serde(default)]
    template: PodTemplate,
}

#[derive(Debug, Default, Deserialize)]
struct PodTemplate {
    #[serde(default)]
    spec: PodSpec,
}

#[derive(Debug, Default, Deserialize)]
struct PodSpec {
    #[serde(default)]
    containers: Vec<serde_json::Value>,
}

/// Extract `spec.template.spec.containers` from a deployment object.
fn parse_containers(json: &str) -> Result<Vec<Container>> {
    let object: DeploymentObject = serde_json::from_str(json)?;
    object
        .spec
        .template
        .spec
        .containers
        .into_iter()
        .map(|value| {
            serde_json::from_value::<Container>(value.clone()).map_err(|_| {
                Error::MalformedDeployment(format!("container without name or image: {value}"))
            })
        })
        .collect()
}
