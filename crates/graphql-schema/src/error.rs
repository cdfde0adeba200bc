use graphql_introspect::IntrospectionError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Failures of a schema introspection run. None of them are retried.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to load schema files: {0}")]
    Load(String),

    #[error("Error while fetching introspection query: {0}")]
    RemoteSchema(String),

    #[error("Failed to merge type definitions: {0}")]
    Merge(String),

    #[error("Invalid merged schema: {0}")]
    SchemaBuild(String),

    #[error("Failed to introspect merged schema: {0}")]
    Introspection(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<IntrospectionError> for SchemaError {
    fn from(error: IntrospectionError) -> Self {
        Self::RemoteSchema(error.to_string())
    }
}
