//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the failure
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the failure-injecting endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SimConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Relative weights of the `/sgv.json` scenario draw.
    pub scenarios: ScenarioWeights,

    /// Glucose random-walk parameters.
    pub glucose: GlucoseConfig,

    /// Durations of the simulated delays.
    pub delays: DelayConfig,

    /// Optional RNG seed. When set, scenario draws and glucose steps are
    /// fully reproducible across runs.
    pub seed: Option<u64>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:17581").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:17581".to_string(),
        }
    }
}

/// Relative weights for the per-request scenario draw on `/sgv.json`.
///
/// Weights are relative, not percentages; the defaults add up to 100 so they
/// read as the documented 50/20/15/10/5 split.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioWeights {
    /// Normal glucose reading.
    pub success: u32,

    /// Stall with no response; the client must time out on its own.
    pub timeout: u32,

    /// Immediate HTTP 500.
    pub server_error: u32,

    /// HTTP 200 with a broken payload.
    pub malformed: u32,

    /// Delayed but otherwise normal reading.
    pub slow: u32,
}

impl Default for ScenarioWeights {
    fn default() -> Self {
        Self {
            success: 50,
            timeout: 20,
            server_error: 15,
            malformed: 10,
            slow: 5,
        }
    }
}

/// Glucose random-walk parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GlucoseConfig {
    /// Value before the first reading is served, in mg/dL.
    pub start: i32,

    /// Lower clamp bound in mg/dL.
    pub floor: i32,

    /// Upper clamp bound in mg/dL.
    pub ceiling: i32,

    /// Maximum absolute change per reading in mg/dL.
    pub max_step: i32,
}

impl Default for GlucoseConfig {
    fn default() -> Self {
        Self {
            start: 120,
            floor: 70,
            ceiling: 250,
            max_step: 5,
        }
    }
}

/// Durations of the simulated delays.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Delay before a `Slow` scenario responds, in seconds.
    pub slow_secs: u64,

    /// Stall duration of the `Timeout` scenario on `/sgv.json`, in seconds.
    pub stall_secs: u64,

    /// Stall duration of the dedicated `/timeout` route, in seconds.
    pub hard_stall_secs: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            slow_secs: 2,
            stall_secs: 10,
            hard_stall_secs: 30,
        }
    }
}
