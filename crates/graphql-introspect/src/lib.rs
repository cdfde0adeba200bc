//! GraphQL introspection query execution and SDL conversion.
//!
//! This crate fetches GraphQL schemas from remote endpoints via introspection
//! and converts them to Schema Definition Language (SDL).
//!
//! # Examples
//!
//! ## Remote schema as SDL
//!
//! ```no_run
//! use graphql_introspect::{Endpoint, IntrospectionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = Endpoint::new("https://api.example.com/graphql", false);
//!     let sdl = IntrospectionClient::new().fetch_sdl(&endpoint).await?;
//!     println!("{}", sdl);
//!     Ok(())
//! }
//! ```
//!
//! ## Self-signed development servers
//!
//! ```no_run
//! use graphql_introspect::{Endpoint, IntrospectionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Certificate checks are skipped for this endpoint only.
//!     let endpoint = Endpoint::new("https://localhost:4443/graphql", true);
//!     let data = IntrospectionClient::new().execute(&endpoint).await?;
//!     println!("{} types", data.schema.types.len());
//!     Ok(())
//! }
//! ```

mod client;
mod endpoint;
mod error;
mod query;
mod sdl;
mod types;

pub use client::{parse_response_body, IntrospectionClient};
pub use endpoint::{is_http_url, Endpoint};
pub use error::{IntrospectionError, Result};
pub use query::INTROSPECTION_QUERY;
pub use sdl::introspection_to_sdl;
pub use types::*;
