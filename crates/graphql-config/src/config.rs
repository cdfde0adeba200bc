use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Glob matching client-side schema files when none is configured.
pub const DEFAULT_CLIENT_PATTERN: &str = "stores/**/*.graphql";

/// Where the introspection JSON is written when no output is configured.
pub const DEFAULT_OUTPUT: &str = "schema.json";

/// Certificate checks are skipped for `https` remotes unless disabled.
pub const DEFAULT_INSECURE: bool = true;

/// Settings for one schema introspection run.
///
/// Every field is optional so that a config file and command-line flags can
/// be layered; the `*_or_default` accessors fill in what neither provides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodegenConfig {
    /// Remote GraphQL endpoint URL or path to a schema file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,

    /// Glob pattern for client schema files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,

    /// Output path for the introspection JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Accept invalid TLS certificates from an `https` remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl CodegenConfig {
    /// Layers `overrides` on top of `self`; values set in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            remote: overrides.remote.or(self.remote),
            client: overrides.client.or(self.client),
            output: overrides.output.or(self.output),
            insecure: overrides.insecure.or(self.insecure),
        }
    }

    #[must_use]
    pub fn client_or_default(&self) -> &str {
        self.client.as_deref().unwrap_or(DEFAULT_CLIENT_PATTERN)
    }

    #[must_use]
    pub fn output_or_default(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT))
    }

    #[must_use]
    pub fn insecure_or_default(&self) -> bool {
        self.insecure.unwrap_or(DEFAULT_INSECURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodegenConfig::default();
        assert!(config.remote.is_none());
        assert_eq!(config.client_or_default(), "stores/**/*.graphql");
        assert_eq!(config.output_or_default(), Path::new("schema.json"));
        assert!(config.insecure_or_default());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = CodegenConfig {
            remote: Some("https://api.example.com/graphql".to_string()),
            client: Some("client/**/*.graphql".to_string()),
            output: None,
            insecure: Some(false),
        };
        let flags = CodegenConfig {
            remote: None,
            client: Some("local/*.graphql".to_string()),
            output: Some(PathBuf::from("out/schema.json")),
            insecure: None,
        };

        let merged = file.merge(flags);
        assert_eq!(
            merged.remote.as_deref(),
            Some("https://api.example.com/graphql")
        );
        assert_eq!(merged.client_or_default(), "local/*.graphql");
        assert_eq!(merged.output_or_default(), Path::new("out/schema.json"));
        assert!(!merged.insecure_or_default());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<CodegenConfig, _> =
            serde_json::from_str(r#"{"remote": "schema.graphql", "target": "swift"}"#);
        assert!(result.is_err());
    }
}
