//! Weighted scenario selection.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use thiserror::Error;

use crate::config::ScenarioWeights;

/// The behavior class selected for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioOutcome {
    /// HTTP 200 with one glucose reading.
    Success,
    /// Stall, then close without writing a response.
    Timeout,
    /// Immediate HTTP 500.
    ServerError,
    /// HTTP 200 with a broken payload.
    Malformed,
    /// Delayed success.
    Slow,
    /// HTTP 204 with no body.
    Empty,
}

/// Error building a scenario table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("scenario weights must not all be zero")]
    ZeroWeights,
}

/// Weighted distribution over the `/sgv.json` outcomes.
///
/// The draw takes an explicit RNG so tests can seed it and assert exact
/// sequencing; each draw is independent of all prior draws.
#[derive(Debug, Clone)]
pub struct ScenarioTable {
    outcomes: [ScenarioOutcome; 5],
    index: WeightedIndex<u32>,
}

impl ScenarioTable {
    /// Build a table from configured weights.
    pub fn new(weights: &ScenarioWeights) -> Result<Self, TableError> {
        let outcomes = [
            ScenarioOutcome::Success,
            ScenarioOutcome::Timeout,
            ScenarioOutcome::ServerError,
            ScenarioOutcome::Malformed,
            ScenarioOutcome::Slow,
        ];
        let index = WeightedIndex::new([
            weights.success,
            weights.timeout,
            weights.server_error,
            weights.malformed,
            weights.slow,
        ])
        .map_err(|_| TableError::ZeroWeights)?;

        Ok(Self { outcomes, index })
    }

    /// Draw one outcome.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> ScenarioOutcome {
        self.outcomes[self.index.sample(rng)]
    }
}
