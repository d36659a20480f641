//! Pull request legality rules.

use tracing::{error, info};

use crate::branch::{BranchCategory, BranchRef};
use crate::error::{Error, Result};

/// Repository that only accepts release PRs from staging into main.
pub const RELEASE_ONLY_REPO: &str = "queen";

/// Outcome of a PR policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyVerdict {
    pub legal: bool,
    /// Human-readable explanation, for both accepted and rejected PRs.
    pub reason: String,
}

impl PolicyVerdict {
    fn allow(reason: impl Into<String>) -> Self {
        Self {
            legal: true,
            reason: reason.into(),
        }
    }

    fn deny(reason: impl Into<String>) -> Self {
        Self {
            legal: false,
            reason: reason.into(),
        }
    }

    /// Convert a rejection into [`Error::PolicyViolation`].
    pub fn into_result(self) -> Result<()> {
        if self.legal {
            Ok(())
        } else {
            Err(Error::PolicyViolation(self.reason))
        }
    }
}

/// Decide whether a PR from `head` into `base` is allowed for `repo_name`.
pub fn validate_pr(head: &BranchRef, base: &BranchRef, repo_name: &str) -> PolicyVerdict {
    let verdict = evaluate(head, base, repo_name);
    if verdict.legal {
        info!("Valid PR: {}", verdict.reason);
    } else {
        error!("Invalid PR: {}", verdict.reason);
    }
    verdict
}

fn evaluate(head: &BranchRef, base: &BranchRef, repo_name: &str) -> PolicyVerdict {
    if repo_name == RELEASE_ONLY_REPO {
        return if head.is_staging() && base.is_main() {
            PolicyVerdict::allow(format!("staging -> main for {RELEASE_ONLY_REPO} repository"))
        } else {
            PolicyVerdict::deny(format!(
                "only PRs from 'staging' to 'main' are allowed for {RELEASE_ONLY_REPO} repository"
            ))
        };
    }

    match head.category() {
        BranchCategory::Feature | BranchCategory::Fix => {
            if base.is_staging() {
                PolicyVerdict::allow(format!("{head} -> staging"))
            } else {
                PolicyVerdict::deny("PRs from 'feature/*' or 'fix/*' must target 'staging'")
            }
        }
        BranchCategory::Staging => {
            if base.is_main() {
                PolicyVerdict::allow("staging -> main")
            } else {
                PolicyVerdict::deny("PR from 'staging' must target 'main'")
            }
        }
        BranchCategory::Hotfix => {
            if base.is_main() {
                PolicyVerdict::allow(format!("{head} -> main"))
            } else {
                PolicyVerdict::deny("PR from 'hotfix/*' must target 'main'")
            }
        }
        BranchCategory::Main | BranchCategory::Other => {
            PolicyVerdict::deny(format!("PR from '{head}' does not meet any of the required rules"))
        }
    }
}
