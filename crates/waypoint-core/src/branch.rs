//! Branch classification shared by every resolver.
//!
//! Policy checks, environment resolution and tag generation all consult
//! [`BranchRef::classify`] so that a branch name maps to one category
//! everywhere.

use std::fmt;

use serde::Serialize;

pub const STAGING: &str = "staging";
pub const MAIN: &str = "main";

const FEATURE_PREFIX: &str = "feature/";
const FIX_PREFIX: &str = "fix/";
const HOTFIX_PREFIX: &str = "hotfix/";

/// Category of a branch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchCategory {
    Feature,
    Fix,
    Staging,
    Main,
    Hotfix,
    Other,
}

impl BranchCategory {
    /// Feature and fix branches follow the same routing rules.
    pub fn is_feature_or_fix(self) -> bool {
        matches!(self, BranchCategory::Feature | BranchCategory::Fix)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BranchCategory::Feature => "feature",
            BranchCategory::Fix => "fix",
            BranchCategory::Staging => "staging",
            BranchCategory::Main => "main",
            BranchCategory::Hotfix => "hotfix",
            BranchCategory::Other => "other",
        }
    }
}

impl fmt::Display for BranchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: BranchCategory,
    /// Text after the category prefix; empty for staging, main and other.
    pub suffix: String,
}

/// A source-control branch reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchRef {
    name: String,
}

impl BranchRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classify the branch. Never fails; unmatched names are `Other`.
    pub fn classify(&self) -> Classification {
        let name = self.name.as_str();

        if let Some(rest) = name.strip_prefix(FEATURE_PREFIX) {
            return Classification::with_suffix(BranchCategory::Feature, rest);
        }
        if let Some(rest) = name.strip_prefix(FIX_PREFIX) {
            return Classification::with_suffix(BranchCategory::Fix, rest);
        }
        if name == STAGING {
            return Classification::bare(BranchCategory::Staging);
        }
        if name == MAIN {
            return Classification::bare(BranchCategory::Main);
        }
        if let Some(rest) = name.strip_prefix(HOTFIX_PREFIX) {
            return Classification::with_suffix(BranchCategory::Hotfix, rest);
        }
        Classification::bare(BranchCategory::Other)
    }

    pub fn category(&self) -> BranchCategory {
        self.classify().category
    }

    /// Whether this is exactly the `main` branch.
    pub fn is_main(&self) -> bool {
        self.name == MAIN
    }

    /// Whether this is exactly the `staging` branch.
    pub fn is_staging(&self) -> bool {
        self.name == STAGING
    }

    /// Branch name with every `/` replaced by `-`, safe for image tags.
    pub fn tag_safe(&self) -> String {
        self.name.replace('/', "-")
    }
}

impl From<&str> for BranchRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Classification {
    fn with_suffix(category: BranchCategory, suffix: &str) -> Self {
        Self {
            category,
            suffix: suffix.to_string(),
        }
    }

    fn bare(category: BranchCategory) -> Self {
        Self {
            category,
            suffix: String::new(),
        }
    }
}
