//! Individual connectivity checks.

use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;

use crate::glucose::Reading;

/// How long the raw TCP connect may take.
pub const SOCKET_TIMEOUT: Duration = Duration::from_secs(3);

/// How long the HTTP service probe may take end to end.
pub const SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a service probe failed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("connection refused")]
    Refused,

    #[error("timeout")]
    Timeout,

    #[error("HTTP {0}")]
    Status(u16),

    /// Body was not a decodable reading array.
    #[error("unparseable body: {0}")]
    Decode(String),

    /// Valid JSON, but zero readings.
    #[error("no readings in response")]
    NoReadings,

    #[error("request failed: {0}")]
    Transport(String),
}

/// The newest reading a working service returned.
#[derive(Debug, Clone)]
pub struct LatestReading {
    pub sgv: i32,
    pub direction: String,
}

/// Check raw TCP reachability.
pub async fn probe_socket(addr: &str, port: u16) -> bool {
    matches!(
        tokio::time::timeout(SOCKET_TIMEOUT, TcpStream::connect((addr, port))).await,
        Ok(Ok(_))
    )
}

/// Fetch and decode `/sgv.json` from the candidate address.
pub async fn probe_service(
    client: &reqwest::Client,
    addr: &str,
    port: u16,
) -> Result<LatestReading, ServiceError> {
    let url = format!("http://{addr}:{port}/sgv.json");
    let response = client
        .get(&url)
        .timeout(SERVICE_TIMEOUT)
        .send()
        .await
        .map_err(classify)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status(status.as_u16()));
    }

    let readings: Vec<Reading> = response
        .json()
        .await
        .map_err(|e| ServiceError::Decode(e.to_string()))?;

    let newest = readings.into_iter().next().ok_or(ServiceError::NoReadings)?;
    Ok(LatestReading {
        sgv: newest.sgv,
        direction: newest.direction,
    })
}

fn classify(e: reqwest::Error) -> ServiceError {
    if e.is_timeout() {
        ServiceError::Timeout
    } else if e.is_connect() {
        ServiceError::Refused
    } else {
        ServiceError::Transport(e.to_string())
    }
}
