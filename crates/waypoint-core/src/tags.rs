//! Image tag derivation.
//!
//! The sha-tag prefix records provenance in the registry: `mn-` for main,
//! `st-` for staging, `hf-` for hotfixes and `ft-` for features.

use serde::Serialize;
use tracing::error;

use crate::branch::{BranchCategory, BranchRef};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagPair {
    pub suffix: String,
    pub sha_tag: String,
}

/// Generate the image tags for a build of `head` towards `base`.
///
/// Precedence is fixed: a `main` base wins, then a `staging` base, then a
/// hotfix head, then a feature head. Fix branches into anything other than
/// main or staging are unroutable.
pub fn generate_tags(head: &BranchRef, base: &BranchRef, sha: &str) -> Result<TagPair> {
    if sha.is_empty() {
        return Err(Error::MissingRequiredField("sha"));
    }

    if base.is_main() {
        return Ok(TagPair {
            suffix: "latest".to_string(),
            sha_tag: format!("mn-{sha}"),
        });
    }
    if base.is_staging() {
        return Ok(TagPair {
            suffix: "staging".to_string(),
            sha_tag: format!("st-{sha}"),
        });
    }

    let prefix = match head.category() {
        BranchCategory::Hotfix => "hf",
        BranchCategory::Feature => "ft",
        _ => {
            error!("No matching branch found for image tag generation");
            return Err(Error::UnroutableBranch {
                head: head.to_string(),
                base: base.to_string(),
            });
        }
    };

    let suffix = head.tag_safe();
    let sha_tag = format!("{prefix}-{suffix}-{sha}");
    Ok(TagPair { suffix, sha_tag })
}
