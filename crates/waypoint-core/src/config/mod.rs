//! Environment configuration document
//!
//! The document maps environment names (`dev`, `stage`, `prod`) to the
//! deployments that live in them. It is loaded once per invocation and
//! never mutated.

pub mod parser;
pub mod schema;

pub use parser::{load_config, parse_config_str};
pub use schema::{Deployment, EnvironmentConfig, EnvironmentSpec};
