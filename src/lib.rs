//! Mock xDrip endpoints for glucose-client testing.
//!
//! Two HTTP servers and a connection probe, all emulating the xDrip+ web
//! service that the KarooGlucometer client polls:
//!
//! - **failure**: a deliberately misbehaving `/sgv.json` endpoint. Each
//!   request draws a weighted scenario (success, stall, 500, malformed
//!   payload, slow response). Connections are handled one at a time, so a
//!   stalled request blocks the whole listener -- exactly the peer behavior
//!   the client's timeout handling has to survive.
//! - **steady**: a well-behaved concurrent mock for happy-path testing, with
//!   fixed modes (steady, single, empty, error, slow).
//! - **probe**: sweeps candidate Bluetooth-PAN addresses and reports which
//!   one is serving glucose data.

// Core subsystems
pub mod config;
pub mod glucose;
pub mod http;
pub mod net;
pub mod scenario;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod probe;

pub use config::SimConfig;
pub use http::{FailureServer, SteadyMode};
pub use lifecycle::Shutdown;
