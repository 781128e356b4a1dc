//! The well-behaved mock endpoint.
//!
//! A concurrent axum server emulating a healthy xDrip+ peer. Each mode pins
//! one response shape so a client test run exercises exactly one behavior.

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio::time::sleep;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::GlucoseConfig;
use crate::glucose::{GlucoseWalk, Reading, Trend};
use crate::net::Listener;

const DEVICE_NAME: &str = "MockSensor";

/// Delay applied by [`SteadyMode::Slow`] before answering.
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Response shape served by the steady mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteadyMode {
    /// Three readings at 5-minute spacing.
    Steady,
    /// One reading.
    Single,
    /// Empty JSON array.
    Empty,
    /// Always HTTP 500.
    Error,
    /// Sleep, then behave like `Steady`.
    Slow,
}

impl fmt::Display for SteadyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SteadyMode::Steady => "steady",
            SteadyMode::Single => "single",
            SteadyMode::Empty => "empty",
            SteadyMode::Error => "error",
            SteadyMode::Slow => "slow",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("unknown mode '{0}', expected steady|single|empty|error|slow")]
pub struct ParseModeError(String);

impl FromStr for SteadyMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steady" => Ok(SteadyMode::Steady),
            "single" => Ok(SteadyMode::Single),
            "empty" => Ok(SteadyMode::Empty),
            "error" => Ok(SteadyMode::Error),
            "slow" => Ok(SteadyMode::Slow),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Shared handler state.
///
/// The walk sits behind a mutex because this server, unlike the failure
/// server, handles connections concurrently.
#[derive(Clone)]
struct SteadyState {
    mode: SteadyMode,
    walk: Arc<Mutex<GlucoseWalk>>,
}

/// Payload of the `/status.json` route.
#[derive(Debug, Serialize)]
struct MockStatus {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    mode: String,
}

/// Build the steady-mock router.
pub fn router(mode: SteadyMode) -> Router {
    let state = SteadyState {
        mode,
        walk: Arc::new(Mutex::new(GlucoseWalk::new(&GlucoseConfig::default()))),
    };

    Router::new()
        .route("/sgv.json", get(sgv))
        .route("/status.json", get(status))
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Serve until the shutdown signal fires.
pub async fn run(
    mode: SteadyMode,
    listener: Listener,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, mode = %mode, "Steady mock listening");
    }

    axum::serve(listener.into_inner(), router(mode))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("Steady mock stopped");
    Ok(())
}

async fn sgv(State(state): State<SteadyState>) -> Response {
    match state.mode {
        SteadyMode::Error => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
        SteadyMode::Empty => Json(Vec::<Reading>::new()).into_response(),
        SteadyMode::Single => Json(readings(&state, 1).await).into_response(),
        SteadyMode::Steady => Json(readings(&state, 3).await).into_response(),
        SteadyMode::Slow => {
            sleep(SLOW_RESPONSE).await;
            Json(readings(&state, 3).await).into_response()
        }
    }
}

/// Generate `count` readings, newest first, spaced 5 minutes apart.
async fn readings(state: &SteadyState, count: usize) -> Vec<Reading> {
    let mut walk = state.walk.lock().await;
    let now = Utc::now();

    let out: Vec<Reading> = (0..count)
        .map(|i| {
            let change = walk.step(&mut rand::thread_rng());
            let at = now - chrono::Duration::minutes(5 * i as i64);
            Reading::full(walk.value(), Trend::from_delta(change), DEVICE_NAME, at)
        })
        .collect();

    tracing::info!(count = out.len(), sgv = walk.value(), "served glucose data");
    out
}

async fn status(State(state): State<SteadyState>) -> Json<MockStatus> {
    Json(MockStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().timestamp_millis(),
        mode: state.mode.to_string(),
    })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
