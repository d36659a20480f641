//! Source-control event inputs.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::branch::BranchRef;
use crate::deploy::DispatchInput;
use crate::error::{Error, Result};

pub const WORKFLOW_DISPATCH: &str = "workflow_dispatch";

/// One push or dispatch event to resolve into a plan.
#[derive(Debug, Clone)]
pub struct PipelineEvent {
    pub repo_name: String,
    pub head: BranchRef,
    pub base: BranchRef,
    pub sha: String,
    pub dispatch: Option<DispatchInput>,
}

impl PipelineEvent {
    /// Build an event, rejecting empty required fields.
    pub fn new(repo_name: &str, head_ref: &str, base_ref: &str, sha: &str) -> Result<Self> {
        require("repo_name", repo_name)?;
        require("head_ref", head_ref)?;
        require("base_ref", base_ref)?;
        require("sha", sha)?;

        Ok(Self {
            repo_name: repo_name.to_string(),
            head: BranchRef::new(head_ref),
            base: BranchRef::new(base_ref),
            sha: sha.to_string(),
            dispatch: None,
        })
    }

    pub fn with_dispatch(mut self, dispatch: Option<DispatchInput>) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Project targeted by a dispatch, if any.
    pub fn project(&self) -> Option<&str> {
        self.dispatch.as_ref().map(|d| d.project.as_str())
    }
}

/// Reject an empty required value.
pub fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingRequiredField(field));
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize)]
struct DispatchPayload {
    #[serde(default)]
    inputs: DispatchInputs,
}

#[derive(Debug, Default, Deserialize)]
struct DispatchInputs {
    #[serde(default)]
    environment: String,
}

/// Read the dispatch target from an event payload file.
///
/// Only `workflow_dispatch` events carry a target; any other event name
/// yields `None` without touching the file. A dispatch event whose file is
/// missing is an error rather than an untargeted plan.
pub fn read_dispatch_input(event_name: &str, event_path: &Path) -> Result<Option<DispatchInput>> {
    if event_name != WORKFLOW_DISPATCH {
        info!("Not a workflow_dispatch event, skipping dispatch parsing");
        return Ok(None);
    }

    let content = std::fs::read_to_string(event_path).map_err(|e| Error::EventLoad {
        path: event_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let payload: DispatchPayload =
        serde_json::from_str(&content).map_err(|e| Error::EventLoad {
            path: event_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    DispatchInput::parse(&payload.inputs.environment).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn event_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let err = PipelineEvent::new("api", "main", "main", "").unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField("sha")));
        let err = PipelineEvent::new("", "main", "main", "abc").unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField("repo_name")));
    }

    #[test]
    fn non_dispatch_events_skip_the_file() {
        let parsed = read_dispatch_input("push", Path::new("/does/not/exist")).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn dispatch_event_is_parsed() {
        let file = event_file(r#"{"inputs": {"environment": "dev-bob"}}"#);
        let parsed = read_dispatch_input(WORKFLOW_DISPATCH, file.path())
            .unwrap()
            .unwrap();
        assert_eq!(parsed.project, "bob");
    }

    #[test]
    fn dispatch_without_environment_fails() {
        let file = event_file(r#"{"inputs": {}}"#);
        let err = read_dispatch_input(WORKFLOW_DISPATCH, file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidDispatchInput(_)));
    }

    #[test]
    fn missing_dispatch_event_file_fails() {
        let err = read_dispatch_input(WORKFLOW_DISPATCH, Path::new("/does/not/exist")).unwrap_err();
        assert!(matches!(err, Error::EventLoad { .. }));
    }

    #[test]
    fn unreadable_event_file_fails() {
        let file = event_file("not json");
        let err = read_dispatch_input(WORKFLOW_DISPATCH, file.path()).unwrap_err();
        assert!(matches!(err, Error::EventLoad { .. }));
    }
}
