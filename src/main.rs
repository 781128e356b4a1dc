//! Mock xDrip endpoint server.
//!
//! ```text
//!                         ┌──────────────────────────────────────────┐
//!                         │                xdrip-sim                  │
//!                         │                                           │
//!   GET /sgv.json         │  failure: serial loop, weighted scenario  │
//!   ──────────────────────┼─▶ success │ stall │ 500 │ garbage │ slow  │
//!                         │                                           │
//!   GET /sgv.json         │  steady: concurrent axum mock,            │
//!   ──────────────────────┼─▶ fixed mode per run                      │
//!                         └──────────────────────────────────────────┘
//! ```
//!
//! `xdrip-sim failure` serves the misbehaving endpoint the client's timeout
//! and parse handling is tested against; `xdrip-sim steady` serves the
//! happy-path mock.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use xdrip_sim::config::{loader, ListenerConfig, SimConfig};
use xdrip_sim::http::{steady, FailureServer, SteadyMode};
use xdrip_sim::lifecycle::Shutdown;
use xdrip_sim::net::Listener;
use xdrip_sim::observability::logging;

#[derive(Parser)]
#[command(name = "xdrip-sim")]
#[command(about = "Mock xDrip endpoints for glucose-client testing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Failure-injecting endpoint: weighted scenarios, one connection at a time
    Failure {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 17581)]
        port: u16,

        /// TOML file overriding scenario weights, glucose bounds, and delays
        #[arg(long)]
        config: Option<PathBuf>,

        /// RNG seed for a reproducible scenario sequence
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Well-behaved mock endpoint
    Steady {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 17580)]
        port: u16,

        /// Response shape: steady|single|empty|error|slow
        #[arg(long, default_value = "steady")]
        mode: SteadyMode,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("xdrip_sim=info,tower_http=info");

    let cli = Cli::parse();
    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    match cli.command {
        Commands::Failure {
            host,
            port,
            config,
            seed,
        } => {
            let mut config = match config {
                Some(path) => loader::load_config(&path)?,
                None => SimConfig::default(),
            };
            config.listener.bind_address = format!("{host}:{port}");
            if seed.is_some() {
                config.seed = seed;
            }

            tracing::info!(
                address = %config.listener.bind_address,
                success = config.scenarios.success,
                timeout = config.scenarios.timeout,
                server_error = config.scenarios.server_error,
                malformed = config.scenarios.malformed,
                slow = config.scenarios.slow,
                "Starting failure server"
            );
            tracing::info!("Routes: /sgv.json /timeout /malformed /empty /status");

            let listener = Listener::bind(&config.listener).await?;
            let server = FailureServer::new(config)?;
            server.run(listener, shutdown.subscribe()).await?;
        }
        Commands::Steady { host, port, mode } => {
            let listener_config = ListenerConfig {
                bind_address: format!("{host}:{port}"),
            };

            tracing::info!(
                address = %listener_config.bind_address,
                mode = %mode,
                "Starting steady mock"
            );
            tracing::info!("Routes: /sgv.json /status.json");

            let listener = Listener::bind(&listener_config).await?;
            steady::run(mode, listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
