//! Prime spiral: a bounded prime sieve, a density-matched random control
//! sieve, and an Archimedean spiral layout that places every integer at a
//! roughly constant arc-length distance from its predecessor.
//!
//! The core is pure. A renderer builds a [`SieveSet`] once per bound, then
//! calls [`plan_frame`] on every redraw and paints the returned points.

pub mod config;
pub mod error;
pub mod frame;
pub mod sieve;
pub mod spiral;
pub mod viz_common;

pub use config::{SpiralConfig, Variant};
pub use error::{SpiralError, SpiralResult};
pub use frame::{plan_frame, Frame, PlacedPoint, SieveSet, Viewport};
pub use sieve::{Classifier, PrimeSieve, RandomSieve};
pub use spiral::{
    advance, draw_spiral_curve, estimate_count_within_radius, to_cartesian, Pixel,
    SpiralParams, SpiralState, SpiralWalk,
};
