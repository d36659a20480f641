//! Chat notification payload for failed pipeline runs.

use serde::Serialize;

/// Inputs describing the failed run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub repo: String,
    pub actor: String,
    pub branch: String,
    pub environment: String,
    pub workflow_url: String,
    pub validate_status: String,
    pub build_status: String,
    pub deploy_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPayload {
    pub icon_emoji: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub text: String,
    pub mrkdwn: bool,
}

/// Glyph for a job status, case-insensitive.
pub fn status_glyph(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "failure" | "failed" => "❌",
        "success" | "passed" => "✅",
        "pending" | "running" => "⏳",
        "cancelled" => "🚫",
        _ => "❔",
    }
}

impl PipelineReport {
    pub fn message(&self) -> String {
        format!(
            "🚨 PIPELINE RUN ERROR 🚨\n\n\
             Jobs Status:\n\
             VALIDATE_ENV: {}\n\
             BUILD: {}\n\
             DEPLOY: {}\n\n\
             Repository: {}\n\
             Author: {}\n\
             Branch: {}\n\
             Environment: {}\n\n\
             Action link: {}",
            status_glyph(&self.validate_status),
            status_glyph(&self.build_status),
            status_glyph(&self.deploy_status),
            self.repo,
            self.actor,
            self.branch,
            self.environment,
            self.workflow_url,
        )
    }

    pub fn to_payload(&self) -> NotificationPayload {
        NotificationPayload {
            icon_emoji: ":robot:".to_string(),
            attachments: vec![Attachment {
                text: self.message(),
                mrkdwn: true,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> PipelineReport {
        PipelineReport {
            repo: "api".into(),
            actor: "octocat".into(),
            branch: "feature/x".into(),
            environment: "dev".into(),
            workflow_url: "https://ci.example/run/1".into(),
            validate_status: "success".into(),
            build_status: "FAILURE".into(),
            deploy_status: "skipped".into(),
        }
    }

    #[test]
    fn glyphs() {
        assert_eq!(status_glyph("Passed"), "✅");
        assert_eq!(status_glyph("running"), "⏳");
        assert_eq!(status_glyph("cancelled"), "🚫");
        assert_eq!(status_glyph("skipped"), "❔");
    }

    #[test]
    fn message_layout() {
        let text = report().message();
        assert!(text.starts_with("🚨 PIPELINE RUN ERROR 🚨\n\nJobs Status:\n"));
        assert!(text.contains("VALIDATE_ENV: ✅\nBUILD: ❌\nDEPLOY: ❔\n\n"));
        assert!(text.contains("Branch: feature/x\n"));
        assert!(text.ends_with("Action link: https://ci.example/run/1"));
    }

    #[test]
    fn payload_shape() {
        let value = serde_json::to_value(report().to_payload()).unwrap();
        assert_eq!(value["icon_emoji"], ":robot:");
        assert_eq!(value["attachments"][0]["mrkdwn"], true);
    }
}
