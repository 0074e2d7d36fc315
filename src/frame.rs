//! One redraw worth of geometry.
//!
//! [`plan_frame`] turns a configuration, a classifier and a viewport into the
//! list of points a renderer should paint, plus the optional guide curve.
//! The renderer only decides colors and fonts.

use crate::config::SpiralConfig;
use crate::error::SpiralResult;
use crate::sieve::{Classifier, PrimeSieve, RandomSieve};
use crate::spiral::{
    draw_spiral_curve, estimate_count_within_radius, to_cartesian, Pixel, SpiralWalk,
    NUMBER_ROTATION,
};
use serde::Serialize;
use tracing::debug;

// ─── Viewport ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center pixel, rounded.
    pub fn center(&self) -> (f64, f64) {
        ((self.width / 2.0).round(), (self.height / 2.0).round())
    }

    /// Distance from the center to a corner, rounded up. The spiral has to
    /// reach this far to cover the whole screen.
    pub fn diagonal(&self) -> f64 {
        let (cx, cy) = self.center();
        (cx * cx + cy * cy).sqrt().ceil()
    }
}

// ─── Sieves ─────────────────────────────────────────────────────────────────

/// The prime sieve and its density-matched control, built once per bound and
/// reused across redraws.
#[derive(Debug, Clone)]
pub struct SieveSet {
    primes: PrimeSieve,
    control: RandomSieve,
}

impl SieveSet {
    pub fn new(max_number: u64, seed: Option<u64>) -> SpiralResult<Self> {
        let primes = PrimeSieve::new(max_number)?;
        let threshold = primes.density();
        let control = match seed {
            Some(seed) => RandomSieve::with_seed(max_number, threshold, seed)?,
            None => RandomSieve::new(max_number, threshold)?,
        };
        Ok(Self { primes, control })
    }

    pub fn from_config(config: &SpiralConfig) -> SpiralResult<Self> {
        Self::new(config.max_number, config.seed)
    }

    pub fn primes(&self) -> &PrimeSieve {
        &self.primes
    }

    pub fn control(&self) -> &RandomSieve {
        &self.control
    }

    /// The classification source for the current mode.
    pub fn classifier(&self, random_mode: bool) -> &dyn Classifier {
        if random_mode {
            &self.control
        } else {
            &self.primes
        }
    }
}

// ─── Frame ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacedPoint {
    pub index: u64,
    pub is_prime: bool,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Estimated number of indices that fit on screen; points cover
    /// `1..greatest`.
    pub greatest: u64,
    /// False once `greatest` reaches the detail limit.
    pub detailed: bool,
    /// Draw digit glyphs instead of dots.
    pub glyphs: bool,
    pub only_primes: bool,
    /// Background guide curve, present only in detailed frames whose spiral
    /// reaches the viewport diagonal before the bound runs out.
    pub curve: Option<Vec<Pixel>>,
    pub points: Vec<PlacedPoint>,
}

impl Frame {
    pub fn prime_points(&self) -> impl Iterator<Item = &PlacedPoint> {
        self.points.iter().filter(|p| p.is_prime)
    }
}

/// Lay out every visible index for one redraw.
///
/// Never places more indices than either the configured bound or the
/// classifier's bound allow.
pub fn plan_frame(
    config: &SpiralConfig,
    classifier: &dyn Classifier,
    viewport: Viewport,
) -> SpiralResult<Frame> {
    config.validate()?;
    let params = config.params()?;

    let center = viewport.center();
    let diagonal = viewport.diagonal();
    let hard_cap = config.max_number.min(classifier.max_number());

    let greatest =
        estimate_count_within_radius(params.step(), params.radius_factor(), diagonal, hard_cap)?;
    let detailed = greatest < config.detail_limit;
    let glyphs = config.show_numbers && detailed;
    let only_primes = config.only_primes || !detailed;

    // Stopping at the cap means the spiral never reached the diagonal; the
    // curve would then cost far more than the points it frames.
    let curve = if detailed && greatest < hard_cap {
        Some(draw_spiral_curve(
            center.0,
            center.1,
            params.radius_factor(),
            diagonal,
        )?)
    } else {
        None
    };

    let mut points = Vec::new();
    for (index, angle, radius) in SpiralWalk::new(params) {
        if index >= greatest {
            break;
        }
        let is_prime = classifier.query(index)?;
        if only_primes && !is_prime {
            continue;
        }
        let Pixel { x, y } = to_cartesian(center, angle, NUMBER_ROTATION, radius);
        points.push(PlacedPoint {
            index,
            is_prime,
            x,
            y,
        });
    }

    debug!(greatest, detailed, points = points.len(), "frame planned");
    Ok(Frame {
        greatest,
        detailed,
        glyphs,
        only_primes,
        curve,
        points,
    })
}

// ─── Tests ──────────────────────────────────────────────────────────────────
