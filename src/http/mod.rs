//! HTTP servers.
//!
//! # Data Flow
//! ```text
//! failure server (serial):
//!     net::Listener
//!         → request.rs (read + parse request head)
//!         → failure.rs (route dispatch, scenario draw, state update)
//!         → response.rs (write raw HTTP/1.1 bytes, or deliberately nothing)
//!
//! steady server (concurrent):
//!     axum Router → steady.rs handlers → axum::Json
//! ```
//!
//! The failure server speaks HTTP by hand because its whole point is
//! misbehavior a framework won't express: a handler must produce a response,
//! while this server must sometimes produce nothing and drop the socket.

pub mod failure;
pub mod request;
pub mod response;
pub mod steady;

pub use failure::FailureServer;
pub use steady::SteadyMode;
