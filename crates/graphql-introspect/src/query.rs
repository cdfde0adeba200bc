//! The standard introspection query.

/// Standard GraphQL introspection query.
///
/// This query fetches the complete schema information including:
/// - Query, mutation, and subscription root types
/// - All type definitions with their fields and arguments
/// - Directive definitions
/// - Deprecation information
///
/// The query includes nested type references up to 7 levels deep to handle
/// complex type wrappers like `[[[String!]!]!]`.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introspection_query_is_valid() {
        // Basic sanity check that the query string contains expected content
        assert!(INTROSPECTION_QUERY.contains("IntrospectionQuery"));
        assert!(INTROSPECTION_QUERY.contains("__schema"));
        assert!(INTROSPECTION_QUERY.contains("types"));
        assert!(INTROSPECTION_QUERY.contains("directives"));
    }

    #[test]
    fn test_introspection_query_requests_deprecations() {
        assert!(INTROSPECTION_QUERY.contains("fields(includeDeprecated: true)"));
        assert!(INTROSPECTION_QUERY.contains("enumValues(includeDeprecated: true)"));
        assert!(INTROSPECTION_QUERY.contains("deprecationReason"));
        assert!(INTROSPECTION_QUERY.contains("possibleTypes"));
        assert!(INTROSPECTION_QUERY.contains("inputFields"));
    }
}
