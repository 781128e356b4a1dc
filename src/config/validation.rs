//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (glucose bounds ordered, step positive)
//! - Reject a scenario table that can never produce an outcome
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: SimConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the server

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::SimConfig;

/// A single semantic problem found in a config.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Bind address did not parse as `host:port`.
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    /// Every scenario weight is zero, so no outcome can ever be drawn.
    #[error("scenario weights must not all be zero")]
    ZeroWeights,

    /// Glucose floor is not below the ceiling.
    #[error("glucose floor {floor} must be below ceiling {ceiling}")]
    InvertedBounds { floor: i32, ceiling: i32 },

    /// Starting glucose value falls outside the clamp bounds.
    #[error("glucose start {start} outside [{floor}, {ceiling}]")]
    StartOutOfRange { start: i32, floor: i32, ceiling: i32 },

    /// A zero or negative step would freeze the random walk.
    #[error("glucose max_step must be positive, got {0}")]
    NonPositiveStep(i32),
}

/// Check a deserialized config for semantic problems.
pub fn validate_config(config: &SimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let w = &config.scenarios;
    if w.success == 0 && w.timeout == 0 && w.server_error == 0 && w.malformed == 0 && w.slow == 0 {
        errors.push(ValidationError::ZeroWeights);
    }

    let g = &config.glucose;
    if g.floor >= g.ceiling {
        errors.push(ValidationError::InvertedBounds {
            floor: g.floor,
            ceiling: g.ceiling,
        });
    } else if g.start < g.floor || g.start > g.ceiling {
        errors.push(ValidationError::StartOutOfRange {
            start: g.start,
            floor: g.floor,
            ceiling: g.ceiling,
        });
    }

    if g.max_step <= 0 {
        errors.push(ValidationError::NonPositiveStep(g.max_step));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&SimConfig::default()).is_ok());
    }

    #[test]
    fn rejects_all_zero_weights() {
        let mut config = SimConfig::default();
        config.scenarios.success = 0;
        config.scenarios.timeout = 0;
        config.scenarios.server_error = 0;
        config.scenarios.malformed = 0;
        config.scenarios.slow = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroWeights));
    }

    #[test]
    fn collects_every_error() {
        let mut config = SimConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.glucose.floor = 250;
        config.glucose.ceiling = 70;
        config.glucose.max_step = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_start_outside_bounds() {
        let mut config = SimConfig::default();
        config.glucose.start = 60;

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::StartOutOfRange { start: 60, .. }
        ));
    }
}
