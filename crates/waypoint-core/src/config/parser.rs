//! JSON parser with helpful error messages

use std::path::Path;

use tracing::info;

use super::schema::EnvironmentConfig;
use crate::error::{Error, Result};

/// Load the environment document from disk.
pub fn load_config(path: &Path) -> Result<EnvironmentConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        reason: format!("Failed to read config file: {e}"),
    })?;

    let config = serde_json::from_str(&content).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        reason: describe_json_error(&e, &content),
    })?;

    info!("Configuration successfully loaded from {}", path.display());
    Ok(config)
}

/// Parse the environment document from a string.
pub fn parse_config_str(content: &str) -> Result<EnvironmentConfig> {
    Ok(serde_json::from_str(content)?)
}

fn describe_json_error(error: &serde_json::Error, content: &str) -> String {
    let line_num = error.line();
    if line_num == 0 {
        return format!("JSON parsing error: {error}");
    }
    format!(
        "JSON parsing error at line {}:\n{}\n\nError: {}",
        line_num,
        get_line_context(content, line_num),
        error
    )
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2).min(lines.len());
    let end = (line_num + 2).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
