//! units - Units API server and command-line client
//!
//! `units serve` runs the HTTP API; the other subcommands run a single
//! lookup and print the JSON result to stdout.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use units_core::config::Settings;
use units_core::server::{self, AppState};
use units_core::service::ConceptQuery;
use units_core::{service_from_settings, telemetry};

#[derive(Parser)]
#[command(name = "units")]
#[command(version)]
#[command(about = "Units API - QUDT quantity kinds and units over HTTP", long_about = None)]
struct Cli {
    /// Settings file (YAML)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// SPARQL endpoint URL (overrides settings and SPARQL_URL)
    #[arg(long, global = true)]
    sparql_url: Option<String>,

    /// Serve from a local TriG/N-Quads file instead of the endpoint
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address (overrides settings and HOST_IP)
        #[arg(long)]
        host: Option<String>,
        /// Port (overrides settings and PORT)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Print the catalog of all quantity kinds
    QuantityKinds {
        #[command(flatten)]
        options: OutputOptions,
    },
    /// Print every unit of a quantity kind
    QuantityKind {
        /// Quantity kind IRI
        iri: String,
        #[command(flatten)]
        options: OutputOptions,
        /// Graph namespace to read (repeatable)
        #[arg(long = "graph")]
        graphs: Vec<String>,
    },
    /// Print the quantity kind of a unit and its sibling units
    Unit {
        /// Unit IRI
        iri: String,
        #[command(flatten)]
        options: OutputOptions,
        /// Only print the quantity kind IRI
        #[arg(long)]
        quantity_kind_only: bool,
    },
    /// Print the effective settings
    Settings,
}

#[derive(Args)]
struct OutputOptions {
    /// Language filter (e.g. en, en-GB)
    #[arg(long)]
    lang: Option<String>,
    /// Keep full predicate and object IRIs
    #[arg(long)]
    keep_namespaces: bool,
    /// Drop language tags from values
    #[arg(long)]
    strip_lang_codes: bool,
}

impl OutputOptions {
    fn to_query(&self, graphs: Vec<String>) -> ConceptQuery {
        ConceptQuery {
            lang: self.lang.clone(),
            remove_namespaces: !self.keep_namespaces,
            strip_lang_codes: self.strip_lang_codes,
            graph_namespaces: if graphs.is_empty() { None } else { Some(graphs) },
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::resolve(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(url) = cli.sparql_url {
        settings.sparql_url = url;
    }
    if let Some(dataset) = cli.dataset {
        settings.local_dataset = Some(dataset);
    }
    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            settings.host_ip = host.clone();
        }
        if let Some(port) = port {
            settings.port = *port;
        }
    }

    let log_filter = if cli.verbose { "debug" } else { settings.log_filter.as_str() };
    telemetry::init_tracing(log_filter)?;

    let build_service = || service_from_settings(&settings).context("Failed to build concept service");

    match cli.command {
        Commands::Settings => {
            settings.validate()?;
            print!("{}", serde_yaml::to_string(&settings)?);
        }
        Commands::Serve { .. } => {
            let service = build_service()?;
            server::serve(&settings, AppState::new(service)).await?;
        }
        Commands::QuantityKinds { options } => {
            let catalog = build_service()?
                .quantity_kinds(&options.to_query(Vec::new()))
                .await?;
            print_json(&catalog)?;
        }
        Commands::QuantityKind { iri, options, graphs } => {
            let data = build_service()?
                .quantity_kind_data(&iri, &options.to_query(graphs))
                .await?;
            print_json(&data)?;
        }
        Commands::Unit {
            iri,
            options,
            quantity_kind_only,
        } => {
            let service = build_service()?;
            if quantity_kind_only {
                println!("{}", service.quantity_kind_for_unit(&iri).await?);
            } else {
                let unit = service.unit_data(&iri, &options.to_query(Vec::new())).await?;
                print_json(&unit)?;
            }
        }
    }

    Ok(())
}
