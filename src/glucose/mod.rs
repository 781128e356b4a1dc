//! Glucose reading generation.
//!
//! # Responsibilities
//! - xDrip-shaped reading payloads (`/sgv.json` array elements)
//! - Bounded random walk standing in for a real sensor trace
//! - Trend direction labels derived from the walk step

pub mod reading;
pub mod walk;

pub use reading::Reading;
pub use walk::{GlucoseWalk, Trend};
