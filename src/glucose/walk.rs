//! Bounded random walk over glucose values.

use rand::Rng;

use crate::config::GlucoseConfig;

/// Trend direction labels used by xDrip readings.
///
/// The ordinal values (1..=7) match the `trend` field xDrip emits alongside
/// the string label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    DoubleUp,
    SingleUp,
    FortyFiveUp,
    Flat,
    FortyFiveDown,
    SingleDown,
    DoubleDown,
}

impl Trend {
    /// Classify a per-reading change in mg/dL.
    pub fn from_delta(delta: i32) -> Self {
        if delta > 3 {
            Trend::FortyFiveUp
        } else if delta < -3 {
            Trend::FortyFiveDown
        } else {
            Trend::Flat
        }
    }

    /// The string label xDrip clients parse.
    pub fn label(self) -> &'static str {
        match self {
            Trend::DoubleUp => "DoubleUp",
            Trend::SingleUp => "SingleUp",
            Trend::FortyFiveUp => "FortyFiveUp",
            Trend::Flat => "Flat",
            Trend::FortyFiveDown => "FortyFiveDown",
            Trend::SingleDown => "SingleDown",
            Trend::DoubleDown => "DoubleDown",
        }
    }

    /// The numeric slope ordinal (1 = DoubleUp .. 7 = DoubleDown).
    pub fn ordinal(self) -> u8 {
        match self {
            Trend::DoubleUp => 1,
            Trend::SingleUp => 2,
            Trend::FortyFiveUp => 3,
            Trend::Flat => 4,
            Trend::FortyFiveDown => 5,
            Trend::SingleDown => 6,
            Trend::DoubleDown => 7,
        }
    }
}

/// A random walk clamped to a plausible mg/dL range.
///
/// Owned by one server task; the single-writer discipline is what lets the
/// failure server keep this as plain mutable state with no locking.
#[derive(Debug, Clone)]
pub struct GlucoseWalk {
    value: i32,
    floor: i32,
    ceiling: i32,
    max_step: i32,
}

impl GlucoseWalk {
    /// Start a walk at the configured value.
    pub fn new(config: &GlucoseConfig) -> Self {
        Self {
            value: config.start,
            floor: config.floor,
            ceiling: config.ceiling,
            max_step: config.max_step,
        }
    }

    /// The current value in mg/dL.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Advance the walk by one uniformly-drawn step and return the applied
    /// change (which may be truncated by clamping).
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> i32 {
        let previous = self.value;
        let change = rng.gen_range(-self.max_step..=self.max_step);
        self.value = (self.value + change).clamp(self.floor, self.ceiling);
        self.value - previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> GlucoseConfig {
        GlucoseConfig::default()
    }

    #[test]
    fn walk_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut walk = GlucoseWalk::new(&config());

        for _ in 0..10_000 {
            walk.step(&mut rng);
            assert!((70..=250).contains(&walk.value()));
        }
    }

    #[test]
    fn step_never_exceeds_bound() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut walk = GlucoseWalk::new(&config());

        for _ in 0..1_000 {
            let before = walk.value();
            walk.step(&mut rng);
            assert!((walk.value() - before).abs() <= 5);
        }
    }

    #[test]
    fn walk_clamps_at_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut walk = GlucoseWalk::new(&GlucoseConfig {
            start: 70,
            ..config()
        });

        // From the floor, downward steps must be truncated to zero.
        for _ in 0..100 {
            walk.step(&mut rng);
            assert!(walk.value() >= 70);
        }
    }

    #[test]
    fn trend_classification() {
        assert_eq!(Trend::from_delta(5), Trend::FortyFiveUp);
        assert_eq!(Trend::from_delta(-4), Trend::FortyFiveDown);
        assert_eq!(Trend::from_delta(0), Trend::Flat);
        assert_eq!(Trend::from_delta(3), Trend::Flat);
        assert_eq!(Trend::Flat.ordinal(), 4);
        assert_eq!(Trend::FortyFiveUp.label(), "FortyFiveUp");
    }
}
