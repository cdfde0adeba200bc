//! Configurable GraphQL introspection client.
//!
//! This module provides a client for executing introspection queries with
//! support for custom headers, timeouts and a per-endpoint TLS override.

use crate::{
    introspection_to_sdl, Endpoint, IntrospectionData, IntrospectionError, Result,
    INTROSPECTION_QUERY,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

/// A configurable client for executing GraphQL introspection queries.
///
/// A fresh HTTP client is built for every request, so the TLS settings of one
/// [`Endpoint`] never leak into requests made to another.
///
/// No timeout is applied unless one is configured, and failed requests are
/// never retried.
///
/// # Examples
///
/// ```no_run
/// use graphql_introspect::{Endpoint, IntrospectionClient};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header("Authorization", "Bearer my-token");
/// let endpoint = Endpoint::new("https://localhost:4443/graphql", true);
/// let sdl = client.fetch_sdl(&endpoint).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntrospectionClient {
    headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl IntrospectionClient {
    /// Creates a client with no custom headers and no timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom HTTP header to be sent with the introspection request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the request timeout (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Introspects the endpoint and prints the result as SDL.
    #[tracing::instrument(skip(self), fields(url = %endpoint.url))]
    pub async fn fetch_sdl(&self, endpoint: &Endpoint) -> Result<String> {
        let data = self.execute(endpoint).await?;
        let sdl = introspection_to_sdl(&data);
        tracing::debug!(sdl_length = sdl.len(), "Remote schema printed");
        Ok(sdl)
    }

    /// Executes an introspection query and deserializes the `data` payload.
    #[tracing::instrument(skip(self), fields(url = %endpoint.url))]
    pub async fn execute(&self, endpoint: &Endpoint) -> Result<IntrospectionData> {
        let data = self.execute_raw(endpoint).await?;
        let introspection: IntrospectionData = serde_json::from_value(data).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse introspection response");
            IntrospectionError::Parse(e.to_string())
        })?;

        tracing::info!(
            types = introspection.schema.types.len(),
            directives = introspection.schema.directives.len(),
            "Introspection successful"
        );
        Ok(introspection)
    }

    /// Executes an introspection query and returns the raw `data` JSON.
    ///
    /// The response must carry a `data` object and no GraphQL `errors`.
    pub async fn execute_raw(&self, endpoint: &Endpoint) -> Result<serde_json::Value> {
        let client = self.build_client(endpoint)?;

        let query_body = serde_json::json!({
            "query": INTROSPECTION_QUERY
        });

        tracing::info!("Sending introspection query");
        let mut request = client
            .post(&endpoint.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json");

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request.json(&query_body).send().await.map_err(|e| {
            tracing::warn!(error = %e, "Request failed");
            IntrospectionError::Network(error_chain(&e))
        })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(error_chain(&e)))?;

        parse_response_body(status.as_u16(), &body)
    }

    fn build_client(&self, endpoint: &Endpoint) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if endpoint.accepts_invalid_certs() {
            tracing::warn!("TLS certificate verification disabled for this request");
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder.build().map_err(|e| {
            IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
        })
    }
}

/// Validates a GraphQL-over-HTTP response body and extracts its `data`.
///
/// The status code only matters when the body is not JSON: GraphQL servers
/// commonly report query errors with a 4xx status and a JSON `errors` body.
pub fn parse_response_body(status: u16, body: &str) -> Result<serde_json::Value> {
    let mut json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) if !(200..300).contains(&status) => {
            tracing::error!(status, body, "HTTP error response");
            return Err(IntrospectionError::Http(status, body.to_string()));
        }
        Err(e) => return Err(IntrospectionError::Parse(e.to_string())),
    };

    // Anything in `errors` other than null or an empty list fails the request.
    match json.get("errors") {
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::Array(errors)) if errors.is_empty() => {}
        Some(serde_json::Value::Array(errors)) => {
            return Err(IntrospectionError::GraphQL(format_graphql_errors(errors)));
        }
        Some(other) => {
            return Err(IntrospectionError::GraphQL(format_graphql_errors(
                std::slice::from_ref(other),
            )));
        }
    }

    match json.get_mut("data").map(serde_json::Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(IntrospectionError::MissingData(body.to_string())),
    }
}

fn format_graphql_errors(errors: &[serde_json::Value]) -> String {
    errors
        .iter()
        .map(|error| {
            error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| error.to_string(), str::to_string)
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Renders an error and all of its sources, so TLS and DNS causes stay visible.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        write!(message, ": {cause}").unwrap();
        source = cause.source();
    }
    message
}
