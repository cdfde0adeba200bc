//! Fetching the remote half of the schema.

use crate::loader::load_file_fragment;
use crate::{Fragment, Result, SchemaError};
use graphql_introspect::{
    introspection_to_sdl, is_http_url, parse_introspection_json, Endpoint, IntrospectionClient,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the remote schema comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSource {
    /// An HTTP(S) endpoint answering the introspection query.
    Url(Endpoint),
    /// A schema file: GraphQL schema language, or stored introspection JSON
    /// when the extension is `.json`.
    File(PathBuf),
}

impl RemoteSource {
    /// Classifies `identifier` as a URL (`http://` or `https://`, any case) or
    /// a file path. `insecure` is only kept for URLs.
    #[must_use]
    pub fn parse(identifier: &str, insecure: bool) -> Self {
        if is_http_url(identifier) {
            Self::Url(Endpoint::new(identifier, insecure))
        } else {
            Self::File(PathBuf::from(identifier))
        }
    }

    /// URL or path, for messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Url(endpoint) => endpoint.url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Produces the remote fragment with a default introspection client.
pub async fn fetch_remote_fragment(source: &RemoteSource) -> Result<Fragment> {
    fetch_remote_fragment_with(&IntrospectionClient::new(), source).await
}

/// Produces the remote fragment, using `client` when the source is a URL.
///
/// Transport and response failures become [`SchemaError::RemoteSchema`];
/// file failures become [`SchemaError::Load`].
#[tracing::instrument(skip(client), fields(source = %source.describe()))]
pub async fn fetch_remote_fragment_with(
    client: &IntrospectionClient,
    source: &RemoteSource,
) -> Result<Fragment> {
    match source {
        RemoteSource::Url(endpoint) => {
            tracing::info!(
                insecure = endpoint.accepts_invalid_certs(),
                "Fetching remote schema"
            );
            let sdl = client.fetch_sdl(endpoint).await.map_err(|e| {
                tracing::error!(error = %e, "Remote introspection failed");
                SchemaError::from(e)
            })?;
            Ok(Fragment::new(endpoint.url.clone(), sdl))
        }
        RemoteSource::File(path) => {
            let path = path.clone();
            tokio::task::spawn_blocking(move || load_static_schema(&path))
                .await
                .map_err(|e| SchemaError::Load(format!("Schema file task failed: {e}")))?
        }
    }
}

fn load_static_schema(path: &Path) -> Result<Fragment> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return load_file_fragment(path);
    }

    let source = path.display().to_string();
    let json = fs::read_to_string(path)
        .map_err(|e| SchemaError::Load(format!("Failed to read {source}: {e}")))?;
    let data = parse_introspection_json(&json)
        .map_err(|e| SchemaError::Load(format!("Failed to parse {source}: {e}")))?;

    tracing::debug!(types = data.schema.types.len(), "Loaded stored introspection result");
    Ok(Fragment::new(source, introspection_to_sdl(&data)))
}
