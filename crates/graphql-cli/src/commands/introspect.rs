//! The `introspect-schema` command.

use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use graphql_config::{find_config, load_config, CodegenConfig};
use graphql_introspect::IntrospectionClient;
use graphql_schema::{introspect_schema, IntrospectOptions};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, clap::Args)]
pub struct IntrospectArgs {
    /// Remote GraphQL endpoint URL or path to a schema file
    #[arg(short, long, value_name = "URL_OR_PATH")]
    pub remote: Option<String>,

    /// Glob pattern for client schema files [default: stores/**/*.graphql]
    #[arg(long, value_name = "GLOB")]
    pub client: Option<String>,

    /// Output path for the introspection JSON [default: schema.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Accept invalid TLS certificates from an https remote [default: true]
    #[arg(
        short = 'K',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub insecure: Option<bool>,

    /// HTTP headers to include in the introspection request (can be specified multiple times)
    /// Format: "Header-Name: Header-Value"
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

impl IntrospectArgs {
    fn to_config(&self) -> CodegenConfig {
        CodegenConfig {
            remote: self.remote.clone(),
            client: self.client.clone(),
            output: self.output.clone(),
            insecure: self.insecure,
        }
    }
}

#[tracing::instrument(skip(args, output_options))]
pub async fn run(
    config_path: Option<PathBuf>,
    args: &IntrospectArgs,
    output_options: OutputOptions,
) -> Result<()> {
    let start_time = std::time::Instant::now();
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let config_path = match config_path {
        Some(path) => Some(path),
        None => find_config(&cwd).context("Failed to search for config file")?,
    };
    let file_config = match &config_path {
        Some(path) => Some(
            load_config(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
        ),
        None => None,
    };
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| cwd, Path::to_path_buf);

    let options = resolve_options(file_config, args, base_dir)?;

    let spinner = crate::progress::spinner(
        &format!("Introspecting schema from {}...", options.remote),
        output_options.show_progress,
    );
    let result = introspect_schema(&options).await;
    spinner.finish_and_clear();
    let json = result?;

    if let (true, Some(path)) = (output_options.show_info, &options.output) {
        println!(
            "{} Introspection result written to {} ({} bytes)",
            "✓".green(),
            path.display().to_string().cyan(),
            json.len()
        );
        println!(
            "  {} {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Layers command-line values over the config file and fills in defaults.
fn resolve_options(
    file_config: Option<CodegenConfig>,
    args: &IntrospectArgs,
    base_dir: PathBuf,
) -> Result<IntrospectOptions> {
    let config = file_config.unwrap_or_default().merge(args.to_config());

    let remote = config.remote.clone().context(
        "No remote schema given. Pass --remote or set `remote` in .graphql-codegenrc",
    )?;

    let headers = args
        .headers
        .iter()
        .map(|h| parse_header(h))
        .collect::<Result<Vec<_>>>()
        .context("Failed to parse headers")?;
    let mut transport = IntrospectionClient::new().with_headers(headers);
    if let Some(seconds) = args.timeout {
        transport = transport.with_timeout(Duration::from_secs(seconds));
    }

    Ok(IntrospectOptions::new(remote)
        .with_client(config.client_or_default())
        .with_output(config.output_or_default())
        .with_insecure(config.insecure_or_default())
        .with_base_dir(base_dir)
        .with_transport(transport))
}

/// Parses a header string in "Name: Value" format.
fn parse_header(header: &str) -> Result<(String, String)> {
    let Some((name, value)) = header.split_once(':') else {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    };
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name.to_string(), value.trim().to_string()))
}
