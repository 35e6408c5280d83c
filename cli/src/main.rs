//! Hotel reservation broker - CLI server
//!
//! Runs the REST reservation API and the SOAP availability service in one
//! process.
//!
//! ```sh
//! # Run with default config (~/.config/hotel-broker/config.toml)
//! hotel-broker
//!
//! # Custom config path
//! hotel-broker --config /etc/hotel-broker/config.toml
//!
//! # Override ports
//! hotel-broker --api-port 8080 --soap-port 8081
//!
//! # Validate config without starting
//! hotel-broker --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use hotel_broker::config::AppConfig;
use hotel_broker::server::{init_tracing, ServerHandle, ServerOptions};

/// Hotel reservation broker: REST bookings checked against a SOAP
/// availability service.
#[derive(Parser, Debug)]
#[command(
    name = "hotel-broker",
    version,
    about = "Availability-checked hotel reservation broker",
    long_about = "REST API for hotel reservations plus the SOAP checkAvailability \
                  service it consults.\n\n\
                  Default config: ~/.config/hotel-broker/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BROKER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the SOAP service listen port.
    #[arg(long)]
    soap_port: Option<u16>,

    /// Override the availability backend endpoint.
    #[arg(long)]
    backend_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(hotel_broker::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Invalid configuration in {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(port) = cli.soap_port {
        config.server.soap_port = port;
    }
    if let Some(url) = cli.backend_url {
        config.backend.endpoint = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        if let Err(e) = config.validate() {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.api_address());
        println!("   SOAP address: {} (enabled: {})", config.soap_address(), config.server.soap_enabled);
        println!("   Backend     : {}", config.backend.endpoint);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
