//! Connection probing for the glucose endpoint.
//!
//! # Responsibilities
//! - TCP reachability probe per candidate address
//! - HTTP probe of the `/sgv.json` service with payload decoding
//! - Sweep over the usual Bluetooth-PAN addresses plus localhost
//!
//! The probes are plain library functions; `xdrip-probe` owns the report
//! formatting so the sweep stays testable without capturing stdout.

pub mod checks;
pub mod sweep;

pub use checks::{probe_service, probe_socket, LatestReading, ServiceError};
pub use sweep::{probe_address, sweep, working_address, AddressReport, BLUETOOTH_PAN_ADDRS};
