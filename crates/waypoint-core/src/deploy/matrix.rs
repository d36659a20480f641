//! Per-repository build contexts.

use serde::Serialize;

/// Repositories whose images depend on the shared utils package.
const UTILS_REPOS: &[&str] = &[
    "accounts",
    "api",
    "auth",
    "customer",
    "games",
    "images",
    "integrations",
    "notifications",
    "payments",
    "ranks",
    "security",
    "support",
    "tools",
    "user-stats",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub context: String,
}

/// Build matrix in the shape CI matrix strategies expect:
/// `{"include": [{"context": "."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMatrix {
    pub include: Vec<BuildContext>,
}

impl BuildMatrix {
    fn from_contexts(contexts: &[&str]) -> Self {
        Self {
            include: contexts
                .iter()
                .map(|c| BuildContext {
                    context: (*c).to_string(),
                })
                .collect(),
        }
    }

    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(|c| c.context.as_str())
    }
}

/// Build contexts for `repo_name`. Unknown repositories build from `.`.
pub fn build_matrix(repo_name: &str) -> BuildMatrix {
    let contexts: &[&str] = match repo_name {
        "tools" => &["app", "client", "db_migrations"],
        "leads" | "promo" => &[".", "app/db_migrations"],
        "accounts" | "game" | "support" | "users" | "payments" => &[".", "db_migrations"],
        _ => &["."],
    };
    BuildMatrix::from_contexts(contexts)
}

pub fn needs_utils(repo_name: &str) -> bool {
    UTILS_REPOS.contains(&repo_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_has_three_contexts() {
        let matrix = build_matrix("tools");
        let contexts: Vec<&str> = matrix.contexts().collect();
        assert_eq!(contexts, vec!["app", "client", "db_migrations"]);
    }

    #[test]
    fn unknown_repo_uses_root_context() {
        let contexts: Vec<String> = build_matrix("something-new")
            .contexts()
            .map(String::from)
            .collect();
        assert_eq!(contexts, vec!["."]);
    }

    #[test]
    fn migration_repos() {
        let contexts: Vec<String> = build_matrix("promo").contexts().map(String::from).collect();
        assert_eq!(contexts, vec![".", "app/db_migrations"]);
        let contexts: Vec<String> = build_matrix("users").contexts().map(String::from).collect();
        assert_eq!(contexts, vec![".", "db_migrations"]);
    }

    #[test]
    fn serializes_as_include_list() {
        let json = serde_json::to_string(&build_matrix("queen")).unwrap();
        assert_eq!(json, r#"{"include":[{"context":"."}]}"#);
    }

    #[test]
    fn utils_membership() {
        assert!(needs_utils("user-stats"));
        assert!(!needs_utils("queen"));
    }
}
