//! Client schema introspection.
//!
//! Builds the schema a client application sees: client-side type
//! definitions found on disk are merged with the schema of a remote GraphQL
//! service, and the standard introspection query is run against the result.
//! The introspection JSON is what code generators consume.
//!
//! The stages can be driven one by one:
//!
//! ```no_run
//! use graphql_schema::{
//!     build_schema, fetch_remote_fragment, load_local_fragments, merge_fragments,
//!     run_introspection, RemoteSource,
//! };
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut fragments = load_local_fragments(Path::new("."), "stores/**/*.graphql")?;
//! let source = RemoteSource::parse("https://api.example.com/graphql", false);
//! fragments.push(fetch_remote_fragment(&source).await?);
//!
//! let schema = build_schema(&merge_fragments(fragments)?)?;
//! println!("{}", run_introspection(&schema)?);
//! # Ok(())
//! # }
//! ```
//!
//! or all at once with [`introspect_schema`].

mod error;
mod executable;
mod fragment;
mod loader;
mod merge;
mod pipeline;
mod remote;
mod runner;

pub use error::{Result, SchemaError};
pub use executable::{build_schema, ExecutableSchema};
pub use fragment::Fragment;
pub use loader::{load_file_fragment, load_local_fragments};
pub use merge::{merge_fragments, MergedDocument};
pub use pipeline::{introspect_schema, IntrospectOptions};
pub use remote::{fetch_remote_fragment, fetch_remote_fragment_with, RemoteSource};
pub use runner::{run_introspection, write_output};
