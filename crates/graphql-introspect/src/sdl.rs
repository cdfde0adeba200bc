//! SDL (Schema Definition Language) conversion from introspection responses.

use crate::types::{IntrospectionData, IntrospectionField, IntrospectionType, IntrospectionTypeRef};
use std::fmt::Write;

/// Built-in GraphQL scalar types that should not be included in generated SDL.
const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Directives every GraphQL implementation provides.
const BUILTIN_DIRECTIVES: &[&str] = &["skip", "include", "deprecated", "specifiedBy", "oneOf"];

/// Converts GraphQL introspection data to SDL (Schema Definition Language).
///
/// This function generates clean, readable SDL from introspection data by:
/// - Filtering out built-in scalar types (Int, Float, String, Boolean, ID)
/// - Filtering out introspection types (types starting with `__`)
/// - Filtering out built-in directives (@skip, @include, @deprecated, @specifiedBy)
/// - Preserving descriptions, deprecation information, and custom directives
/// - Formatting with proper indentation and GraphQL syntax
///
/// # Arguments
///
/// * `introspection` - The introspection `data` payload to convert
///
/// # Returns
///
/// Returns a formatted SDL string representing the schema.
///
/// # Examples
///
/// ```no_run
/// # use graphql_introspect::{introspection_to_sdl, parse_introspection_json};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let json = std::fs::read_to_string("schema.json")?;
/// let introspection = parse_introspection_json(&json)?;
/// let sdl = introspection_to_sdl(&introspection);
/// println!("{}", sdl);
/// # Ok(())
/// # }
/// ```
#[must_use]
#[tracing::instrument(skip(introspection), fields(
    types = introspection.schema.types.len(),
    directives = introspection.schema.directives.len()
))]
pub fn introspection_to_sdl(introspection: &IntrospectionData) -> String {
    tracing::debug!("Converting introspection to SDL");
    let mut sdl = String::new();
    let schema = &introspection.schema;

    let needs_schema_def = schema
        .query_type
        .as_ref()
        .is_some_and(|t| t.name != "Query")
        || schema
            .mutation_type
            .as_ref()
            .is_some_and(|t| t.name != "Mutation")
        || schema
            .subscription_type
            .as_ref()
            .is_some_and(|t| t.name != "Subscription");

    if needs_schema_def {
        sdl.push_str("schema {\n");
        if let Some(ref query) = schema.query_type {
            writeln!(sdl, "  query: {}", query.name).unwrap();
        }
        if let Some(ref mutation) = schema.mutation_type {
            writeln!(sdl, "  mutation: {}", mutation.name).unwrap();
        }
        if let Some(ref subscription) = schema.subscription_type {
            writeln!(sdl, "  subscription: {}", subscription.name).unwrap();
        }
        sdl.push_str("}\n\n");
    }

    for directive in &schema.directives {
        if BUILTIN_DIRECTIVES.contains(&directive.name.as_str()) {
            continue;
        }

        write_description(&mut sdl, directive.description.as_ref(), 0);
        write!(sdl, "directive @{}", directive.name).unwrap();

        if !directive.args.is_empty() {
            sdl.push('(');
            for (i, arg) in directive.args.iter().enumerate() {
                if i > 0 {
                    sdl.push_str(", ");
                }
                write!(sdl, "{}: {}", arg.name, arg.type_ref.to_type_string()).unwrap();
                if let Some(default) = &arg.default_value {
                    write!(sdl, " = {default}").unwrap();
                }
            }
            sdl.push(')');
        }

        sdl.push_str(" on ");
        sdl.push_str(&directive.locations.join(" | "));
        sdl.push_str("\n\n");
    }

    let mut types_written = 0;
    for type_def in &schema.types {
        let name = type_def.name();
        if name.starts_with("__") || BUILTIN_SCALARS.contains(&name) {
            continue;
        }

        write_type(&mut sdl, type_def);
        sdl.push_str("\n\n");
        types_written += 1;
    }

    tracing::debug!(
        types_written,
        sdl_length = sdl.len(),
        "SDL generation complete"
    );
    sdl.trim_end().to_string()
}

fn write_type(sdl: &mut String, type_def: &IntrospectionType) {
    match type_def {
        IntrospectionType::Scalar(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "scalar {}", t.name).unwrap();
        }
        IntrospectionType::Object(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "type {}", t.name).unwrap();
            write_implements(sdl, &t.interfaces);
            write_fields(sdl, &t.fields);
        }
        IntrospectionType::Interface(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "interface {}", t.name).unwrap();
            write_implements(sdl, t.interfaces.as_deref().unwrap_or_default());
            write_fields(sdl, &t.fields);
        }
        IntrospectionType::Union(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            write!(sdl, "union {} = ", t.name).unwrap();
            for (i, member) in t.possible_types.iter().enumerate() {
                if i > 0 {
                    sdl.push_str(" | ");
                }
                sdl.push_str(&member.name);
            }
        }
        IntrospectionType::Enum(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "enum {} {{", t.name).unwrap();
            for value in &t.enum_values {
                write_description(sdl, value.description.as_ref(), 1);
                write!(sdl, "  {}", value.name).unwrap();
                if value.is_deprecated {
                    if let Some(ref reason) = value.deprecation_reason {
                        write!(sdl, " @deprecated(reason: \"{}\")", escape_string(reason)).unwrap();
                    } else {
                        sdl.push_str(" @deprecated");
                    }
                }
                sdl.push('\n');
            }
            sdl.push('}');
        }
        IntrospectionType::InputObject(t) => {
            write_description(sdl, t.description.as_ref(), 0);
            writeln!(sdl, "input {} {{", t.name).unwrap();
            for field in &t.input_fields {
                write_description(sdl, field.description.as_ref(), 1);
                write!(sdl, "  {}: {}", field.name, field.type_ref.to_type_string()).unwrap();
                if let Some(default) = &field.default_value {
                    write!(sdl, " = {default}").unwrap();
                }
                sdl.push('\n');
            }
            sdl.push('}');
        }
    }
}

fn write_implements(sdl: &mut String, interfaces: &[IntrospectionTypeRef]) {
    if interfaces.is_empty() {
        return;
    }
    sdl.push_str(" implements ");
    for (i, interface) in interfaces.iter().enumerate() {
        if i > 0 {
            sdl.push_str(" & ");
        }
        sdl.push_str(&interface.name);
    }
}

/// Field-less types are printed without braces; `{}` is not valid SDL.
fn write_fields(sdl: &mut String, fields: &[IntrospectionField]) {
    if fields.is_empty() {
        return;
    }
    sdl.push_str(" {\n");
    for field in fields {
        write_field(sdl, field, 1);
    }
    sdl.push('}');
}

fn write_field(sdl: &mut String, field: &IntrospectionField, indent: usize) {
    let indent_str = "  ".repeat(indent);

    write_description(sdl, field.description.as_ref(), indent);
    write!(sdl, "{indent_str}{}", field.name).unwrap();

    if !field.args.is_empty() {
        sdl.push('(');
        for (i, arg) in field.args.iter().enumerate() {
            if i > 0 {
                sdl.push_str(", ");
            }
            write!(sdl, "{}: {}", arg.name, arg.type_ref.to_type_string()).unwrap();
            if let Some(default) = &arg.default_value {
                write!(sdl, " = {default}").unwrap();
            }
        }
        sdl.push(')');
    }

    write!(sdl, ": {}", field.type_ref.to_type_string()).unwrap();

    if field.is_deprecated {
        if let Some(ref reason) = field.deprecation_reason {
            write!(sdl, " @deprecated(reason: \"{}\")", escape_string(reason)).unwrap();
        } else {
            sdl.push_str(" @deprecated");
        }
    }

    sdl.push('\n');
}

fn write_description(sdl: &mut String, description: Option<&String>, indent: usize) {
    if let Some(desc) = description {
        let indent_str = "  ".repeat(indent);
        if desc.contains('\n') && !has_disallowed_block_chars(desc) {
            let desc = desc.replace("\"\"\"", "\\\"\"\"");
            writeln!(sdl, "{indent_str}\"\"\"\n{desc}\n{indent_str}\"\"\"").unwrap();
        } else {
            writeln!(sdl, "{indent_str}\"{}\"", escape_string(desc)).unwrap();
        }
    }
}

/// Block strings cannot carry control characters other than tab and newline
/// without changing their value.
fn has_disallowed_block_chars(s: &str) -> bool {
    s.chars().any(|c| c.is_control() && c != '\n' && c != '\t')
}

fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => write!(escaped, "\\u{:04X}", u32::from(c)).unwrap(),
            c => escaped.push(c),
        }
    }
    escaped
}
