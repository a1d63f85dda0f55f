// rpc-repl: an interactive shell for RPC service descriptions
//
// This is the main entry point for the rpc-repl application.

use anyhow::{Context, Result};
use clap::Parser;
use rpc_repl::cli::{Repl, Ui};
use rpc_repl::config::create_shared_session;
use rpc_repl::config::storage::{expand_path, Config};
use rpc_repl::env::{Catalog, CatalogEnvironment, Environment};
use std::path::PathBuf;
use std::sync::Arc;

/// Explore and call the RPCs of a service description interactively
#[derive(Parser, Debug)]
#[command(name = "rpc-repl", version, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Server host
    #[arg(long, env = "RPC_REPL_HOST")]
    host: Option<String>,

    /// Server port
    #[arg(short, long, env = "RPC_REPL_PORT")]
    port: Option<String>,

    /// JSON catalog describing packages, services and messages
    #[arg(long, env = "RPC_REPL_CATALOG")]
    catalog: Option<String>,

    /// Data-source descriptor shown in the prompt
    #[arg(long)]
    dsn: Option<String>,

    /// Splash text printed on startup
    #[arg(long)]
    splash: Option<String>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rpc_repl=debug,info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Config::default()
        }),
    };

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = &cli.port {
        config.server.port = port.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.clone());
    }
    if let Some(dsn) = &cli.dsn {
        config.catalog.dsn = dsn.clone();
    }
    if let Some(splash) = &cli.splash {
        config.repl.splash_text_path = Some(splash.clone());
    }

    Ok(config)
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let Some(path) = config.catalog.path.as_deref() else {
        tracing::warn!("no catalog configured, starting with an empty one");
        return Ok(Catalog::new());
    };

    let resolved = expand_path(path).with_context(|| format!("cannot resolve {}", path))?;
    let catalog = Catalog::from_file(&resolved)
        .with_context(|| format!("failed to load catalog from {}", resolved.display()))?;
    tracing::info!(path = %resolved.display(), packages = catalog.packages.len(), "catalog loaded");

    Ok(catalog)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let catalog = load_catalog(&config)?;

    if cli.save_config {
        match &cli.config {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
        .context("failed to save configuration")?;
        tracing::info!("configuration saved");
    }

    let env: Arc<dyn Environment> =
        Arc::new(CatalogEnvironment::new(catalog, config.catalog.dsn.clone()));
    let session = create_shared_session(config.server.host.clone(), config.server.port.clone());
    let history = if config.repl.history {
        Config::history_file()
    } else {
        None
    };

    let mut repl = Repl::new(env, session, Ui::basic())
        .with_splash(config.repl.splash_text_path.clone())
        .with_history(history);

    repl.start().await?;

    Ok(())
}
