//! Error types for branch resolution and deployment operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load config file {}: {reason}", .path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to load event file {}: {reason}", .path.display())]
    EventLoad { path: PathBuf, reason: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("No matching branch rule for head '{head}' and base '{base}'")]
    UnroutableBranch { head: String, base: String },

    #[error("Invalid dispatch environment '{0}'. Expected <env>-<project> with env one of dev, stage, prod")]
    InvalidDispatchInput(String),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Command failed: {command}\n{stderr}")]
    ExternalCommand { command: String, stderr: String },

    #[error("Malformed deployment: {0}")]
    MalformedDeployment(String),
}

/// Result type for waypoint operations
pub type Result<T> = std::result::Result<T, Error>;
