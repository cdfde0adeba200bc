//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the structure of GraphQL introspection query responses
//! and can be deserialized from JSON using serde.

use crate::{IntrospectionError, Result};
use serde::{Deserialize, Serialize};

/// Top-level introspection response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

/// A stored introspection result, with or without the `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIntrospection {
    Envelope(IntrospectionResponse),
    Bare(IntrospectionData),
}

/// Parses a stored introspection result such as a previously generated `schema.json`.
///
/// Accepts both `{"data": {"__schema": ...}}` and a bare `{"__schema": ...}` object.
///
/// ```
/// # use graphql_introspect::parse_introspection_json;
/// let json = r#"{"__schema": {
///     "queryType": {"name": "Query"},
///     "mutationType": null,
///     "subscriptionType": null,
///     "types": [],
///     "directives": []
/// }}"#;
/// let data = parse_introspection_json(json).unwrap();
/// assert!(data.schema.types.is_empty());
/// ```
pub fn parse_introspection_json(json: &str) -> Result<IntrospectionData> {
    let stored: StoredIntrospection =
        serde_json::from_str(json).map_err(|e| IntrospectionError::Parse(e.to_string()))?;
    Ok(match stored {
        StoredIntrospection::Envelope(response) => response.data,
        StoredIntrospection::Bare(data) => data,
    })
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// Complete GraphQL schema information from introspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: Option<IntrospectionTypeRef>,
    pub mutation_type: Option<IntrospectionTypeRef>,
    pub subscription_type: Option<IntrospectionTypeRef>,
    pub types: Vec<IntrospectionType>,
    pub directives: Vec<IntrospectionDirective>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionTypeRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IntrospectionType {
    #[serde(rename = "SCALAR")]
    Scalar(IntrospectionScalarType),
    #[serde(rename = "OBJECT")]
    Object(IntrospectionObjectType),
    #[serde(rename = "INTERFACE")]
    Interface(IntrospectionInterfaceType),
    #[serde(rename = "UNION")]
    Union(IntrospectionUnionType),
    #[serde(rename = "ENUM")]
    Enum(IntrospectionEnumType),
    #[serde(rename = "INPUT_OBJECT")]
    InputObject(IntrospectionInputObjectType),
}

impl IntrospectionType {
    /// The name of the described type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => &t.name,
            Self::Object(t) => &t.name,
            Self::Interface(t) => &t.name,
            Self::Union(t) => &t.name,
            Self::Enum(t) => &t.name,
            Self::InputObject(t) => &t.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionScalarType {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<IntrospectionField>,
    pub interfaces: Vec<IntrospectionTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<IntrospectionField>,
    /// Absent on servers that predate interfaces implementing interfaces.
    #[serde(default)]
    pub interfaces: Option<Vec<IntrospectionTypeRef>>,
    pub possible_types: Option<Vec<IntrospectionTypeRef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionUnionType {
    pub name: String,
    pub description: Option<String>,
    pub possible_types: Vec<IntrospectionTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumType {
    pub name: String,
    pub description: Option<String>,
    pub enum_values: Vec<IntrospectionEnumValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub input_fields: Vec<IntrospectionInputValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionField {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    pub type_ref: IntrospectionTypeRefFull,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionInputValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: IntrospectionTypeRefFull,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionEnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionDirective {
    pub name: String,
    pub description: Option<String>,
    pub locations: Vec<String>,
    pub args: Vec<IntrospectionInputValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionTypeRefFull {
    pub kind: TypeKind,
    pub name: Option<String>,
    pub of_type: Option<Box<IntrospectionTypeRefFull>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl IntrospectionTypeRefFull {
    /// Converts the type reference to a GraphQL type string.
    ///
    /// Handles type wrappers like `NonNull` and `List` to generate strings like:
    /// - `String` for a simple scalar
    /// - `String!` for a non-null scalar
    /// - `[String]` for a list
    /// - `[String!]!` for a non-null list of non-null strings
    ///
    /// # Examples
    ///
    /// ```
    /// # use graphql_introspect::{IntrospectionTypeRefFull, TypeKind};
    /// let type_ref = IntrospectionTypeRefFull {
    ///     kind: TypeKind::NonNull,
    ///     name: None,
    ///     of_type: Some(Box::new(IntrospectionTypeRefFull {
    ///         kind: TypeKind::Scalar,
    ///         name: Some("String".to_string()),
    ///         of_type: None,
    ///     })),
    /// };
    /// assert_eq!(type_ref.to_type_string(), "String!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match self.kind {
            TypeKind::NonNull => self.of_type.as_ref().map_or_else(
                || "!".to_string(),
                |of_type| format!("{}!", of_type.to_type_string()),
            ),
            TypeKind::List => self.of_type.as_ref().map_or_else(
                || "[]".to_string(),
                |of_type| format!("[{}]", of_type.to_type_string()),
            ),
            _ => self.name.as_deref().unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for IntrospectionTypeRefFull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_type_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{"__schema": {
        "queryType": {"name": "Query"},
        "mutationType": null,
        "subscriptionType": null,
        "types": [
            {"kind": "OBJECT", "name": "Query", "description": null,
             "fields": [{"name": "hello", "description": null, "args": [],
                         "type": {"kind": "SCALAR", "name": "String", "ofType": null},
                         "isDeprecated": false, "deprecationReason": null}],
             "inputFields": null, "interfaces": [], "enumValues": null, "possibleTypes": null},
            {"kind": "SCALAR", "name": "String", "description": null,
             "fields": null, "inputFields": null, "interfaces": null,
             "enumValues": null, "possibleTypes": null}
        ],
        "directives": []
    }}"#;

    #[test]
    fn test_parse_bare_introspection() {
        let data = parse_introspection_json(BARE).unwrap();
        let names: Vec<&str> = data.schema.types.iter().map(IntrospectionType::name).collect();
        assert_eq!(names, vec!["Query", "String"]);
        assert_eq!(data.schema.query_type.unwrap().name, "Query");
    }

    #[test]
    fn test_parse_enveloped_introspection() {
        let enveloped = format!(r#"{{"data": {BARE}}}"#);
        let data = parse_introspection_json(&enveloped).unwrap();
        assert_eq!(data.schema.types.len(), 2);
    }

    #[test]
    fn test_parse_rejects_other_json() {
        let result = parse_introspection_json(r#"{"types": []}"#);
        assert!(matches!(result, Err(IntrospectionError::Parse(_))));
    }

    #[test]
    fn test_interface_without_interfaces_field() {
        let json = r#"{"kind": "INTERFACE", "name": "Node", "description": null,
            "fields": [], "possibleTypes": [{"name": "User"}]}"#;
        let parsed: IntrospectionType = serde_json::from_str(json).unwrap();
        let IntrospectionType::Interface(node) = parsed else {
            panic!("expected an interface");
        };
        assert!(node.interfaces.is_none());
    }
}
