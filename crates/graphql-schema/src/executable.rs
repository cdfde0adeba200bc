//! Compiling the merged document into a validated schema.

use crate::{MergedDocument, Result, SchemaError};
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;

/// Source name reported in diagnostics for the merged document.
const MERGED_SOURCE: &str = "merged-schema.graphql";

/// A validated schema that introspection queries can run against.
///
/// No resolvers are attached.
#[derive(Debug)]
pub struct ExecutableSchema {
    schema: Valid<Schema>,
}

impl ExecutableSchema {
    #[must_use]
    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    /// Whether the schema defines a type with this name (built-ins included).
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.schema.types.contains_key(name)
    }
}

/// Parses and validates the merged type definitions.
///
/// Syntax errors and semantic errors (undefined types, conflicting
/// definitions, misused directives) fail with [`SchemaError::SchemaBuild`].
#[tracing::instrument(skip(merged), fields(sdl_length = merged.sdl().len()))]
pub fn build_schema(merged: &MergedDocument) -> Result<ExecutableSchema> {
    let schema = Schema::parse_and_validate(merged.sdl(), MERGED_SOURCE).map_err(|e| {
        tracing::error!(errors = %e.errors, "Merged schema is invalid");
        SchemaError::SchemaBuild(e.errors.to_string())
    })?;

    tracing::info!(types = schema.types.len(), "Executable schema built");
    Ok(ExecutableSchema { schema })
}
