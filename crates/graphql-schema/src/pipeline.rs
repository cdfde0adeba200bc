//! The end-to-end introspection run.

use crate::{
    build_schema, fetch_remote_fragment_with, load_local_fragments, merge_fragments,
    run_introspection, write_output, RemoteSource, Result, SchemaError,
};
use graphql_config::{DEFAULT_CLIENT_PATTERN, DEFAULT_INSECURE};
use graphql_introspect::IntrospectionClient;
use std::path::PathBuf;

/// Inputs of one [`introspect_schema`] run.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Endpoint URL or schema file path.
    pub remote: String,
    /// Glob for client-side schema files, relative to `base_dir`.
    pub client: String,
    /// Where to write the JSON. Nothing is written when `None`.
    pub output: Option<PathBuf>,
    /// Skip certificate checks for an `https` remote.
    pub insecure: bool,
    pub base_dir: PathBuf,
    /// Transport used when `remote` is a URL.
    pub transport: IntrospectionClient,
}

impl IntrospectOptions {
    /// Options for `remote` with the default glob, no output file and
    /// `insecure` enabled.
    #[must_use]
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
            client: DEFAULT_CLIENT_PATTERN.to_string(),
            output: None,
            insecure: DEFAULT_INSECURE,
            base_dir: PathBuf::from("."),
            transport: IntrospectionClient::new(),
        }
    }

    #[must_use]
    pub fn with_client(mut self, pattern: impl Into<String>) -> Self {
        self.client = pattern.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    #[must_use]
    pub fn with_transport(mut self, transport: IntrospectionClient) -> Self {
        self.transport = transport;
        self
    }
}

/// Loads the client schema files, fetches the remote schema, merges them
/// (remote last, so it wins), builds the schema and introspects it.
///
/// Local files are loaded before the remote is contacted, so a glob that
/// matches nothing fails without any network traffic. The output file is
/// only written once every stage has succeeded. The JSON is returned
/// whether or not it was written.
#[tracing::instrument(skip(options), fields(remote = %options.remote, client = %options.client))]
pub async fn introspect_schema(options: &IntrospectOptions) -> Result<String> {
    let base_dir = options.base_dir.clone();
    let pattern = options.client.clone();
    let mut fragments =
        tokio::task::spawn_blocking(move || load_local_fragments(&base_dir, &pattern))
            .await
            .map_err(|e| SchemaError::Load(format!("Schema loading task failed: {e}")))??;

    let source = RemoteSource::parse(&options.remote, options.insecure);
    let remote = fetch_remote_fragment_with(&options.transport, &source).await?;
    fragments.push(remote);

    tracing::debug!(fragments = fragments.len(), "Merging fragments");
    let merged = merge_fragments(fragments)?;
    let schema = build_schema(&merged)?;
    let json = run_introspection(&schema)?;

    if let Some(output) = &options.output {
        write_output(output, &json)?;
    }

    Ok(json)
}
