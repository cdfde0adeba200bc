//! Merging type-definition fragments into a single document.
//!
//! Precedence is whole-definition, last wins: when two fragments define the
//! same type, directive or schema definition, the later fragment's version
//! replaces the earlier one outright (fields are not unioned). The remote
//! schema is merged last, so it is authoritative for every type it defines.
//!
//! Type extensions are never replaced. Client-only fields added with
//! `extend type Query { ... }` therefore survive a remote `type Query`.

use crate::loader::is_executable;
use crate::{Fragment, Result, SchemaError};
use apollo_compiler::ast::{Definition, Document};
use apollo_compiler::Name;
use std::collections::HashMap;

/// Scalars every schema provides.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Directives every schema provides.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// A single type-definition document produced by [`merge_fragments`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedDocument {
    sdl: String,
}

impl MergedDocument {
    #[must_use]
    pub fn sdl(&self) -> &str {
        &self.sdl
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum DefinitionKey {
    Schema,
    Directive(Name),
    Type(Name),
}

impl DefinitionKey {
    fn of(definition: &Definition) -> Option<Self> {
        let key = match definition {
            Definition::SchemaDefinition(_) => Self::Schema,
            Definition::DirectiveDefinition(d) => Self::Directive(d.name.clone()),
            Definition::ScalarTypeDefinition(d) => Self::Type(d.name.clone()),
            Definition::ObjectTypeDefinition(d) => Self::Type(d.name.clone()),
            Definition::InterfaceTypeDefinition(d) => Self::Type(d.name.clone()),
            Definition::UnionTypeDefinition(d) => Self::Type(d.name.clone()),
            Definition::EnumTypeDefinition(d) => Self::Type(d.name.clone()),
            Definition::InputObjectTypeDefinition(d) => Self::Type(d.name.clone()),
            _ => return None,
        };
        Some(key)
    }

    fn is_builtin(&self) -> bool {
        match self {
            Self::Schema => false,
            Self::Directive(name) => BUILTIN_DIRECTIVES.contains(&name.as_str()),
            Self::Type(name) => {
                name.as_str().starts_with("__") || BUILTIN_SCALARS.contains(&name.as_str())
            }
        }
    }
}

/// Merges fragments in order into one document.
///
/// See the module documentation for the precedence rules. Definitions keep
/// the position of their first occurrence; extensions follow all definitions
/// in source order.
#[tracing::instrument(skip(fragments), fields(fragments = fragments.len()))]
pub fn merge_fragments(fragments: Vec<Fragment>) -> Result<MergedDocument> {
    let mut definitions: Vec<Definition> = Vec::new();
    let mut slots: HashMap<DefinitionKey, usize> = HashMap::new();
    let mut extensions: Vec<Definition> = Vec::new();

    for fragment in fragments {
        let (source, sdl) = fragment.into_parts();
        let document = Document::parse(sdl, &source)
            .map_err(|e| SchemaError::Merge(format!("{source}: {}", e.errors)))?;

        for definition in document.definitions {
            if is_executable(&definition) {
                return Err(SchemaError::Merge(format!(
                    "{source}: operations and fragments cannot be merged into a schema"
                )));
            }

            match DefinitionKey::of(&definition) {
                Some(key) if key.is_builtin() => {
                    tracing::trace!(?key, source = %source, "Dropping built-in definition");
                }
                Some(key) => {
                    if let Some(&slot) = slots.get(&key) {
                        tracing::debug!(?key, source = %source, "Definition overridden by later fragment");
                        definitions[slot] = definition;
                    } else {
                        slots.insert(key, definitions.len());
                        definitions.push(definition);
                    }
                }
                None => extensions.push(definition),
            }
        }
    }

    tracing::debug!(
        definitions = definitions.len(),
        extensions = extensions.len(),
        "Fragments merged"
    );

    let mut merged = Document::new();
    merged.definitions = definitions;
    merged.definitions.extend(extensions);

    Ok(MergedDocument {
        sdl: merged.to_string(),
    })
}
