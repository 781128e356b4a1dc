//! The failure-injecting glucose endpoint.
//!
//! # Responsibilities
//! - Serial accept loop: one connection is fully handled (sleeps included)
//!   before the next accept, so a stalled request blocks the whole listener
//! - Route dispatch for /sgv.json, /timeout, /malformed, /empty, /status
//! - Weighted scenario draw per /sgv.json request
//! - Monotonic request counter and bounded glucose walk, single-writer
//!
//! # Failure semantics
//! The simulated failures are the product, not faults to recover from. An
//! internal error while building a response degrades to HTTP 500, and the
//! accept loop keeps running regardless of any single connection's outcome.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time::sleep;

use crate::config::SimConfig;
use crate::glucose::{GlucoseWalk, Reading, Trend};
use crate::http::request::{read_head, RequestError, RequestHead};
use crate::http::response::{write_json, write_no_content, write_text};
use crate::net::Listener;
use crate::scenario::{payloads, ScenarioOutcome, ScenarioTable, TableError};

const SERVER_NAME: &str = "NetworkFailureTestServer";
const DEVICE_NAME: &str = "FailureTestServer";

/// Payload of the `/status` route.
#[derive(Debug, Serialize)]
struct ServerStatus {
    server: &'static str,
    requests_served: u64,
    current_glucose: i32,
    test_mode: &'static str,
}

/// The failure-injecting endpoint.
///
/// Owns all mutable state (RNG, counter, glucose walk). Requests are handled
/// one at a time on a single task, so none of it needs locking.
pub struct FailureServer {
    config: SimConfig,
    table: ScenarioTable,
    rng: StdRng,
    walk: GlucoseWalk,
    requests_served: u64,
}

impl FailureServer {
    /// Build a server from a validated config.
    pub fn new(config: SimConfig) -> Result<Self, TableError> {
        let table = ScenarioTable::new(&config.scenarios)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let walk = GlucoseWalk::new(&config.glucose);

        Ok(Self {
            config,
            table,
            rng,
            walk,
            requests_served: 0,
        })
    }

    /// Run the serial accept loop until the shutdown signal fires.
    pub async fn run(
        mut self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(
                address = %addr,
                "Failure server listening (one connection at a time)"
            );
        }

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                accepted = listener.accept() => {
                    match accepted {
                        Ok((mut stream, peer)) => {
                            if let Err(e) = self.handle_connection(&mut stream).await {
                                tracing::debug!(peer = %peer, error = %e, "connection ended abnormally");
                            }
                            let _ = stream.shutdown().await;
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                        }
                    }
                }
            }
        }

        tracing::info!("Failure server stopped");
        Ok(())
    }

    async fn handle_connection(&mut self, stream: &mut TcpStream) -> Result<(), RequestError> {
        let head = match read_head(stream).await {
            Ok(head) => head,
            Err(e @ (RequestError::Malformed | RequestError::TooLarge)) => {
                write_text(stream, 400, "Bad Request").await?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        if head.method != "GET" {
            write_text(stream, 405, "Method Not Allowed").await?;
            return Ok(());
        }

        // Every routed GET counts, including 404s, matching what /status reports.
        self.requests_served += 1;

        self.dispatch(stream, &head).await?;
        Ok(())
    }

    async fn dispatch(&mut self, stream: &mut TcpStream, head: &RequestHead) -> std::io::Result<()> {
        let delays = self.config.delays.clone();
        match head.path.as_str() {
            "/sgv.json" => {
                let outcome = self.table.draw(&mut self.rng);
                tracing::info!(
                    request = self.requests_served,
                    outcome = ?outcome,
                    "sgv scenario drawn"
                );
                self.apply(stream, outcome, delays.stall_secs).await
            }
            "/timeout" => self.apply(stream, ScenarioOutcome::Timeout, delays.hard_stall_secs).await,
            "/malformed" => self.apply(stream, ScenarioOutcome::Malformed, 0).await,
            "/empty" => self.apply(stream, ScenarioOutcome::Empty, 0).await,
            "/status" => self.send_status(stream).await,
            other => {
                tracing::debug!(path = other, "unknown path");
                write_text(stream, 404, "Not Found").await
            }
        }
    }

    /// Produce the effect of one scenario outcome on the connection.
    async fn apply(
        &mut self,
        stream: &mut TcpStream,
        outcome: ScenarioOutcome,
        stall_secs: u64,
    ) -> std::io::Result<()> {
        match outcome {
            ScenarioOutcome::Success => self.send_reading(stream).await,
            ScenarioOutcome::Slow => {
                sleep(Duration::from_secs(self.config.delays.slow_secs)).await;
                self.send_reading(stream).await
            }
            ScenarioOutcome::ServerError => {
                write_text(stream, 500, "Internal Server Error").await
            }
            ScenarioOutcome::Malformed => {
                let payload = payloads::pick(&mut self.rng);
                tracing::info!(payload = payload, "serving malformed payload");
                write_json(stream, 200, payload).await
            }
            ScenarioOutcome::Timeout => {
                // No bytes are ever written; the peer's own timeout is the
                // only way out of this connection.
                tracing::info!(stall_secs, "stalling connection");
                sleep(Duration::from_secs(stall_secs)).await;
                Ok(())
            }
            ScenarioOutcome::Empty => write_no_content(stream).await,
        }
    }

    async fn send_reading(&mut self, stream: &mut TcpStream) -> std::io::Result<()> {
        let change = self.walk.step(&mut self.rng);
        let reading = Reading::minimal(
            self.walk.value(),
            Trend::from_delta(change),
            DEVICE_NAME,
            Utc::now(),
        );

        let body = match serde_json::to_string(&[reading]) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "reading serialization failed, degrading to 500");
                return write_text(stream, 500, "Internal Server Error").await;
            }
        };

        tracing::info!(sgv = self.walk.value(), "serving reading");
        write_json(stream, 200, &body).await
    }

    async fn send_status(&mut self, stream: &mut TcpStream) -> std::io::Result<()> {
        let status = ServerStatus {
            server: SERVER_NAME,
            requests_served: self.requests_served,
            current_glucose: self.walk.value(),
            test_mode: "failure_simulation",
        };

        let body = match serde_json::to_string(&status) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "status serialization failed, degrading to 500");
                return write_text(stream, 500, "Internal Server Error").await;
            }
        };

        write_json(stream, 200, &body).await
    }
}
