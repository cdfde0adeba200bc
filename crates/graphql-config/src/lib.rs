//! Configuration for client schema introspection.
//!
//! Settings can come from a `.graphql-codegenrc` file (YAML or JSON) and are
//! layered under command-line values with [`CodegenConfig::merge`].

mod config;
mod error;
mod loader;

pub use config::{CodegenConfig, DEFAULT_CLIENT_PATTERN, DEFAULT_INSECURE, DEFAULT_OUTPUT};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str};
