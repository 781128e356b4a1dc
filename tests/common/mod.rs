//! Shared utilities for integration tests.

use std::net::SocketAddr;
use xdrip_sim::config::SimConfig;
use xdrip_sim::http::{steady, FailureServer, SteadyMode};
use xdrip_sim::lifecycle::Shutdown;
use xdrip_sim::net::Listener;

/// Start a failure server on an ephemeral port.
///
/// The listener is bound before the task is spawned, so requests issued
/// right after this returns are queued rather than refused.
#[allow(dead_code)]
pub async fn start_failure_server(mut config: SimConfig) -> (SocketAddr, Shutdown) {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = FailureServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Start a steady mock on an ephemeral port.
#[allow(dead_code)]
pub async fn start_steady_server(mode: SteadyMode) -> (SocketAddr, Shutdown) {
    let config = xdrip_sim::config::ListenerConfig {
        bind_address: "127.0.0.1:0".to_string(),
    };

    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = steady::run(mode, listener, rx).await;
    });

    (addr, shutdown)
}

/// A non-pooling client so every request opens a fresh connection.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A config whose `/sgv.json` draw always lands on one scenario.
#[allow(dead_code)]
pub fn scenario_config(
    success: u32,
    timeout: u32,
    server_error: u32,
    malformed: u32,
    slow: u32,
) -> SimConfig {
    let mut config = SimConfig::default();
    config.scenarios.success = success;
    config.scenarios.timeout = timeout;
    config.scenarios.server_error = server_error;
    config.scenarios.malformed = malformed;
    config.scenarios.slow = slow;
    config
}
