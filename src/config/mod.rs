//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags + optional TOML file
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SimConfig (validated, immutable)
//!     → passed by value into the server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload surface
//! - All fields have defaults so a bare `xdrip-sim failure` works
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::DelayConfig;
pub use schema::GlucoseConfig;
pub use schema::ListenerConfig;
pub use schema::ScenarioWeights;
pub use schema::SimConfig;
