//! CLI entry point for the Extrabat client.
//!
//! Authenticates with the credentials found in the environment, then either
//! sends a raw API call or resolves a reference-data label to its id.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use extrabat::{Credentials, Extrabat, ExtrabatConfig, RequestOptions};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "extrabat")]
#[command(about = "A command-line client for the Extrabat API", long_about = None)]
struct Cli {
    /// JSON file overriding `token_url` and/or `api_url`
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a request to an API endpoint and print the normalized response
    Call {
        /// HTTP verb: get, post, put, patch or delete
        verb: String,

        /// Endpoint path relative to the API base URL (e.g. "v1/clients")
        endpoint: String,

        /// JSON request body
        #[arg(short, long)]
        body: Option<String>,

        /// Extra header as "Name: value", may be repeated
        #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
        headers: Vec<String>,
    },
    /// Resolve a reference-data label to its id
    Lookup {
        /// Category: civility, phone-type, address-type, status, group, question, origin, users
        name: String,

        /// Value to look for
        value: String,

        /// Record field compared against VALUE
        #[arg(short, long)]
        field: Option<String>,

        /// Question option whose id should be returned alongside the question id
        #[arg(short, long)]
        option: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/extrabat.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("extrabat.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ExtrabatConfig::load(path)
            .with_context(|| format!("Failed to load config from '{path}'"))?,
        None => ExtrabatConfig::default(),
    };

    let client_id =
        std::env::var("EXTRABAT_CLIENT_ID").context("EXTRABAT_CLIENT_ID must be set")?;
    let client_secret =
        std::env::var("EXTRABAT_CLIENT_SECRET").context("EXTRABAT_CLIENT_SECRET must be set")?;
    let credentials = Credentials::new(client_id, client_secret)?;

    let client = Extrabat::with_config(config, extrabat::fetch::BasicClient::new(), &credentials)
        .context("Failed to authenticate with Extrabat")?;

    match cli.command {
        Commands::Call {
            verb,
            endpoint,
            body,
            headers,
        } => {
            let mut options = RequestOptions::new();
            for header in &headers {
                let (name, value) = parse_header(header)?;
                options = options.header(name, value);
            }
            if let Some(body) = body {
                let body = serde_json::from_str(&body).context("--body is not valid JSON")?;
                options = options.body(body);
            }

            let response = client.call(&verb, &endpoint, &options)?;
            info!(code = response.code, "Call finished");
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Lookup {
            name,
            value,
            field,
            option,
        } => {
            let found =
                client.lookup_id_by_name(&value, &name, field.as_deref(), option.as_deref())?;
            match found {
                Some(id) => println!("{}", serde_json::to_string_pretty(&id)?),
                None => bail!("No {name} entry matches '{value}'"),
            }
        }
    }

    Ok(())
}

/// Splits a `Name: value` header argument.
fn parse_header(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => bail!("Header '{raw}' must look like 'Name: value'"),
    }
}
