use anyhow::{anyhow, bail, Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use axum::Router;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, ServerConfig, StoreConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use todos::{config::TodosConfig, StoreBackend, Todos};
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const TODOS_MODULE: &str = "todos";
const INGRESS_MODULE: &str = "api_ingress";

/// Todo Server - to-dos and focus areas over HTTP, stored in DynamoDB
#[derive(Parser)]
#[command(name = "todo-server")]
#[command(about = "Todo Server - to-dos and focus areas over HTTP, stored in DynamoDB")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Keep data in memory instead of the table store
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity)
    config.apply_cli_overrides(&args);

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Todo Server starting");

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config).await,
    }
}

/// Validate a store endpoint override: absolute http(s) URL with a host.
fn validate_endpoint(store: &StoreConfig) -> Result<()> {
    let Some(raw) = store.endpoint.as_deref().map(str::trim) else {
        return Ok(());
    };
    if raw.is_empty() {
        bail!("Store endpoint is empty");
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid store endpoint '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported store endpoint scheme: {}", other),
    }
    if url.host_str().is_none() {
        bail!("Store endpoint '{}' has no host", raw);
    }
    Ok(())
}

async fn resolve_bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    tokio::net::lookup_host((server.host.as_str(), server.port))
        .await
        .with_context(|| format!("Cannot resolve bind address {}:{}", server.host, server.port))?
        .next()
        .ok_or_else(|| anyhow!("No address for {}:{}", server.host, server.port))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing modules...");

    let todos_config: TodosConfig = config.module_config(TODOS_MODULE)?;
    let ingress_config: ApiIngressConfig = config.module_config(INGRESS_MODULE)?;

    let backend = if args.mock {
        StoreBackend::InMemory
    } else {
        if let Some(store) = &config.store {
            validate_endpoint(store)?;
        }
        StoreBackend::Dynamo(config.store.as_ref())
    };
    let todos = Todos::init(&todos_config, backend).await;

    let ingress = ApiIngress::new(ingress_config)
        .with_request_timeout(Duration::from_secs(config.server.timeout_sec))
        .with_openapi(Todos::openapi());
    let router = ingress.build_router(todos.register_rest(Router::new()))?;

    let addr = resolve_bind_addr(&config.server).await?;
    ingress
        .serve(router, addr, api_ingress::shutdown_signal())
        .await
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if let Some(store) = &config.store {
        validate_endpoint(store)?;
    }
    let _: TodosConfig = config.module_config(TODOS_MODULE)?;
    let _: ApiIngressConfig = config.module_config(INGRESS_MODULE)?;
    resolve_bind_addr(&config.server).await?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);

    Ok(())
}
