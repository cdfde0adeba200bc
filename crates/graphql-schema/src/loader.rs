//! Loading client-side type definitions from disk.

use crate::{Fragment, Result, SchemaError};
use apollo_compiler::ast::{Definition, Document};
use std::fs;
use std::path::Path;

/// Loads every file matching `pattern` as a type-definition fragment.
///
/// Relative patterns are resolved against `base_dir`. Fragments come back in
/// glob match order, which is sorted by path.
#[tracing::instrument(fields(base = %base_dir.display()))]
pub fn load_local_fragments(base_dir: &Path, pattern: &str) -> Result<Vec<Fragment>> {
    // Only the user pattern is glob syntax; `[`, `*` or `?` in the base
    // directory are literal.
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        let base = glob::Pattern::escape(&base_dir.display().to_string());
        Path::new(&base).join(pattern).display().to_string()
    };

    let paths = glob::glob(&full_pattern).map_err(|e| {
        SchemaError::Load(format!("Invalid glob pattern '{full_pattern}': {e}"))
    })?;

    let mut fragments = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| SchemaError::Load(format!("Glob error: {e}")))?;
        if path.is_dir() {
            tracing::trace!(path = %path.display(), "Skipping directory");
            continue;
        }
        fragments.push(load_file_fragment(&path)?);
    }

    if fragments.is_empty() {
        return Err(SchemaError::Load(format!(
            "No files matched pattern: {full_pattern}"
        )));
    }

    tracing::info!(files = fragments.len(), "Local schema files loaded");
    Ok(fragments)
}

/// Loads a single GraphQL schema file.
///
/// The file must parse as GraphQL and may only contain type-system definitions.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_file_fragment(path: &Path) -> Result<Fragment> {
    let source = path.display().to_string();
    let sdl = fs::read_to_string(path)
        .map_err(|e| SchemaError::Load(format!("Failed to read {source}: {e}")))?;

    let document = Document::parse(sdl.as_str(), path)
        .map_err(|e| SchemaError::Load(format!("Failed to parse {source}: {}", e.errors)))?;

    if document.definitions.iter().any(is_executable) {
        return Err(SchemaError::Load(format!(
            "{source} contains operations or fragments; schema files may only contain type definitions"
        )));
    }

    tracing::debug!(definitions = document.definitions.len(), "Parsed schema file");
    Ok(Fragment::new(source, sdl))
}

pub(crate) fn is_executable(definition: &Definition) -> bool {
    matches!(
        definition,
        Definition::OperationDefinition(_) | Definition::FragmentDefinition(_)
    )
}
