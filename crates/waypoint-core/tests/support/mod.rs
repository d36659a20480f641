#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use waypoint_core::cluster::{Container, DeploymentClient};
use waypoint_core::config::{EnvironmentConfig, parse_config_str};
use waypoint_core::error::{Error, Result};

pub const SAMPLE_CONFIG: &str = r#"{
  "environments": {
    "dev": {
      "deployments": [
        { "project": "alice", "namespace": "dev-alice", "host": "alice.dev.example" },
        { "project": "bob", "namespace": "dev-bob" },
        { "project": "shared", "namespace": "shared" }
      ]
    },
    "stage": {
      "deployments": [
        { "project": "alice", "namespace": "stage-alice" },
        { "project": "shared", "namespace": "shared" }
      ]
    },
    "prod": {
      "deployments": [
        { "project": "main", "namespace": "prod" }
      ]
    }
  }
}"#;

pub fn sample_config() -> EnvironmentConfig {
    parse_config_str(SAMPLE_CONFIG).expect("sample config parses")
}

pub fn container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: image.to_string(),
    }
}

/// In-memory cluster recording every image write.
#[derive(Default)]
pub struct FakeCluster {
    deployments: RefCell<HashMap<(String, String), Vec<Container>>>,
    writes: RefCell<Vec<(String, String)>>,
    fail_on: Option<String>,
}

impl FakeCluster {
    pub fn with_deployment(namespace: &str, name: &str, containers: Vec<Container>) -> Self {
        let cluster = Self::default();
        cluster
            .deployments
            .borrow_mut()
            .insert((namespace.to_string(), name.to_string()), containers);
        cluster
    }

    /// Make writes to `container` fail.
    pub fn failing_on(mut self, container: &str) -> Self {
        self.fail_on = Some(container.to_string());
        self
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    pub fn images(&self, namespace: &str, name: &str) -> Vec<String> {
        self.deployments
            .borrow()
            .get(&(namespace.to_string(), name.to_string()))
            .map(|cs| cs.iter().map(|c| c.image.clone()).collect())
            .unwrap_or_default()
    }
}

impl DeploymentClient for FakeCluster {
    fn containers(&self, namespace: &str, deployment: &str) -> Result<Vec<Container>> {
        self.deployments
            .borrow()
            .get(&(namespace.to_string(), deployment.to_string()))
            .cloned()
            .ok_or_else(|| Error::ExternalCommand {
                command: format!("get deployment {deployment} -n {namespace}"),
                stderr: format!("deployments.apps \"{deployment}\" not found"),
            })
    }

    fn set_image(
        &self,
        namespace: &str,
        deployment: &str,
        container: &str,
        image: &str,
    ) -> Result<()> {
        if self.fail_on.as_deref() == Some(container) {
            return Err(Error::ExternalCommand {
                command: format!("set image deployment/{deployment} -n {namespace}"),
                stderr: format!("error: unable to find container named \"{container}\""),
            });
        }

        let mut deployments = self.deployments.borrow_mut();
        let containers = deployments
            .get_mut(&(namespace.to_string(), deployment.to_string()))
            .expect("deployment exists");
        for c in containers.iter_mut().filter(|c| c.name == container) {
            c.image = image.to_string();
        }
        self.writes
            .borrow_mut()
            .push((container.to_string(), image.to_string()));
        Ok(())
    }
}
