//! Address sweep.

use crate::probe::checks::{probe_service, probe_socket, LatestReading, ServiceError};

/// Addresses a Bluetooth PAN link usually lands on.
pub const BLUETOOTH_PAN_ADDRS: [&str; 3] = ["192.168.44.1", "192.168.45.1", "192.168.46.1"];

const LOCALHOST: &str = "127.0.0.1";

/// Probe results for one candidate address.
#[derive(Debug)]
pub struct AddressReport {
    pub addr: String,
    pub socket_ok: bool,
    /// `None` when the socket probe already failed and the HTTP probe was
    /// skipped.
    pub service: Option<Result<LatestReading, ServiceError>>,
}

impl AddressReport {
    /// True when the address is serving decodable glucose data.
    pub fn is_working(&self) -> bool {
        matches!(self.service, Some(Ok(_)))
    }
}

/// Probe one address: socket first, HTTP only if the socket answered.
pub async fn probe_address(client: &reqwest::Client, addr: &str, port: u16) -> AddressReport {
    let socket_ok = probe_socket(addr, port).await;
    let service = if socket_ok {
        Some(probe_service(client, addr, port).await)
    } else {
        None
    };

    AddressReport {
        addr: addr.to_string(),
        socket_ok,
        service,
    }
}

/// Probe the PAN candidates and localhost, in order.
pub async fn sweep(client: &reqwest::Client, port: u16) -> Vec<AddressReport> {
    let mut reports = Vec::new();
    for addr in BLUETOOTH_PAN_ADDRS.iter().copied().chain([LOCALHOST]) {
        tracing::debug!(addr, port, "probing");
        reports.push(probe_address(client, addr, port).await);
    }
    reports
}

/// First address that is serving glucose data, if any.
pub fn working_address(reports: &[AddressReport]) -> Option<&str> {
    reports
        .iter()
        .find(|r| r.is_working())
        .map(|r| r.addr.as_str())
}
