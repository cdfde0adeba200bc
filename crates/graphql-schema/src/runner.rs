//! Running the introspection query against a built schema.

use crate::{ExecutableSchema, Result, SchemaError};
use apollo_compiler::introspection;
use apollo_compiler::validation::Valid;
use apollo_compiler::ExecutableDocument;
use graphql_introspect::INTROSPECTION_QUERY;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Executes the standard introspection query and renders its `data` object
/// as JSON with 2-space indentation.
///
/// The output is deterministic for a given schema: types are listed in
/// definition order.
#[tracing::instrument(skip(schema))]
pub fn run_introspection(schema: &ExecutableSchema) -> Result<String> {
    let schema = schema.schema();

    let document = ExecutableDocument::parse_and_validate(
        schema,
        INTROSPECTION_QUERY,
        "introspection.graphql",
    )
    .map_err(|e| SchemaError::Introspection(e.errors.to_string()))?;

    let operation = document
        .operations
        .get(None)
        .map_err(|_| SchemaError::Introspection("Expected exactly one operation".to_string()))?;

    let response = introspection::partial_execute(
        schema,
        &schema.implementers_map(),
        &document,
        operation,
        Valid::assume_valid_ref(&Default::default()),
    )
    .map_err(|e| SchemaError::Introspection(e.message().to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect();
        tracing::error!(errors = messages.len(), "Introspection returned errors");
        return Err(SchemaError::Introspection(messages.join("; ")));
    }

    let data = response
        .data
        .ok_or_else(|| SchemaError::Introspection("Introspection returned no data".to_string()))?;

    let json = serde_json::to_string_pretty(&data)
        .map_err(|e| SchemaError::Introspection(e.to_string()))?;

    tracing::info!(json_length = json.len(), "Introspection complete");
    Ok(json)
}

/// Writes `json` to `path`, creating or truncating the file.
///
/// The handle is closed when this returns, whether or not the write
/// succeeded. No locking: concurrent writers race and the last one wins.
#[tracing::instrument(skip(json), fields(path = %path.display(), bytes = json.len()))]
pub fn write_output(path: &Path, json: &str) -> Result<()> {
    let write_error = |source: std::io::Error| SchemaError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(write_error)?;
    file.write_all(json.as_bytes()).map_err(write_error)?;
    file.flush().map_err(write_error)?;

    tracing::info!("Introspection result written");
    Ok(())
}
