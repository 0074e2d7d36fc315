//! Archimedean spiral placement with roughly constant arc-length spacing.
//!
//! Each advance sweeps the angle by `step / radius`, which for a spiral whose
//! radius grows linearly with the angle keeps the chord between consecutive
//! points close to `step`. Placement approach after
//! <https://stackoverflow.com/a/13901170/778272>.
//!
//! Everything here is a pure function of `(state, parameters)`; callers
//! drive indices `1..N` by repeatedly calling [`SpiralState::advance`] (or
//! iterating a [`SpiralWalk`]) and feeding the result to [`to_cartesian`].

use crate::error::{SpiralError, SpiralResult};
use serde::{Deserialize, Serialize};

/// Starting angle. Keeps the first radius away from the singular origin.
pub const INITIAL_THETA: f64 = 0.6;

/// Rotation applied to numbered points (radians). The guide curve uses 0.
pub const NUMBER_ROTATION: f64 = 1.0;

/// Arc-length step of the background guide curve, in pixels.
pub const CURVE_STEP: f64 = 1.0;

// ─── Parameters & state ─────────────────────────────────────────────────────

/// Validated spacing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    step: f64,
    radius_factor: f64,
}

impl SpiralParams {
    pub fn new(step: f64, radius_factor: f64) -> SpiralResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(SpiralError::InvalidStep(step));
        }
        if !(radius_factor.is_finite() && radius_factor > 0.0) {
            return Err(SpiralError::InvalidRadiusFactor(radius_factor));
        }
        Ok(Self {
            step,
            radius_factor,
        })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn radius_factor(&self) -> f64 {
        self.radius_factor
    }
}

/// Cursor on the spiral. `theta` only ever grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralState {
    pub theta: f64,
    pub radius: f64,
}

impl SpiralState {
    /// `theta = 0.6`, `radius = radius_factor * 0.6`.
    pub fn initial(radius_factor: f64) -> Self {
        Self {
            theta: INITIAL_THETA,
            radius: radius_factor * INITIAL_THETA,
        }
    }

    /// Returns `(next, angle, radius)` where `angle`/`radius` are the point to
    /// draw for the current index, taken before the cursor moves.
    pub fn advance(self, params: &SpiralParams) -> (Self, f64, f64) {
        let angle = self.theta;
        let radius = self.radius;

        let theta = self.theta + params.step / self.radius;
        let next = Self {
            theta,
            radius: params.radius_factor * theta,
        };
        (next, angle, radius)
    }
}

/// Free-function form of [`SpiralState::advance`] that validates the raw
/// parameters and the cursor on every call.
pub fn advance(
    state: SpiralState,
    step: f64,
    radius_factor: f64,
) -> SpiralResult<(SpiralState, f64, f64)> {
    let params = SpiralParams::new(step, radius_factor)?;
    if !(state.theta.is_finite() && state.radius.is_finite() && state.radius > 0.0) {
        return Err(SpiralError::InvalidState {
            theta: state.theta,
            radius: state.radius,
        });
    }
    Ok(state.advance(&params))
}

// ─── Pixel mapping ──────────────────────────────────────────────────────────

/// Integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i64,
    pub y: i64,
}

/// Polar → pixel, rounded to the nearest integer.
pub fn to_cartesian(center: (f64, f64), angle: f64, rotation: f64, radius: f64) -> Pixel {
    let a = angle + rotation;
    Pixel {
        x: (center.0 + radius * a.cos()).round() as i64,
        y: (center.1 + radius * a.sin()).round() as i64,
    }
}

// ─── Walks ──────────────────────────────────────────────────────────────────

/// Endless iterator over `(index, angle, radius)` for indices `1, 2, 3, ...`.
#[derive(Debug, Clone)]
pub struct SpiralWalk {
    params: SpiralParams,
    state: SpiralState,
    index: u64,
}

impl SpiralWalk {
    pub fn new(params: SpiralParams) -> Self {
        Self {
            state: SpiralState::initial(params.radius_factor),
            params,
            index: 1,
        }
    }
}

impl Iterator for SpiralWalk {
    type Item = (u64, f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let (next, angle, radius) = self.state.advance(&self.params);
        let index = self.index;
        self.state = next;
        self.index += 1;
        Some((index, angle, radius))
    }
}

/// How many indices fit before the spiral reaches `max_radius`, capped at
/// `hard_cap`. Used to size the sieve work to what a screen can show.
///
/// Non-decreasing in `max_radius` for fixed spacing.
pub fn estimate_count_within_radius(
    step: f64,
    radius_factor: f64,
    max_radius: f64,
    hard_cap: u64,
) -> SpiralResult<u64> {
    let params = SpiralParams::new(step, radius_factor)?;
    let mut state = SpiralState::initial(radius_factor);
    let mut count = 1;

    while count < hard_cap && state.radius < max_radius {
        (state, _, _) = state.advance(&params);
        count += 1;
    }
    Ok(count)
}

/// Background guide curve: starts at the center and follows the spiral with
/// a one pixel arc step until the radius reaches `diagonal`.
pub fn draw_spiral_curve(
    center_x: f64,
    center_y: f64,
    radius_factor: f64,
    diagonal: f64,
) -> SpiralResult<Vec<Pixel>> {
    let params = SpiralParams::new(CURVE_STEP, radius_factor)?;
    if !diagonal.is_finite() {
        return Err(SpiralError::Config(format!(
            "curve diagonal must be finite, got {}",
            diagonal
        )));
    }

    let center = (center_x, center_y);
    let mut points = vec![to_cartesian(center, INITIAL_THETA, 0.0, 0.0)];
    let mut state = SpiralState::initial(radius_factor);

    while state.radius < diagonal {
        let (next, angle, radius) = state.advance(&params);
        points.push(to_cartesian(center, angle, 0.0, radius));
        state = next;
    }
    Ok(points)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let s = SpiralState::initial(10.0);
        assert_abs_diff_eq!(s.theta, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(s.radius, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_advance() {
        let s = SpiralState::initial(10.0);
        let (next, angle, radius) = advance(s, 1.0, 10.0).unwrap();

        // the drawn point is the pre-advance cursor
        assert_abs_diff_eq!(angle, 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(radius, 6.0, epsilon = 1e-12);

        assert_abs_diff_eq!(next.theta, 0.6 + 1.0 / 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(next.theta, 0.766_666_7, epsilon = 1e-6);
        assert_abs_diff_eq!(next.radius, 7.666_667, epsilon = 1e-6);
    }

    #[test]
    fn test_advance_rejects_degenerate_params() {
        let s = SpiralState::initial(1.0);
        assert_eq!(advance(s, 0.0, 1.0), Err(SpiralError::InvalidStep(0.0)));
        assert_eq!(advance(s, -2.0, 1.0), Err(SpiralError::InvalidStep(-2.0)));
        assert_eq!(
            advance(s, 1.0, 0.0),
            Err(SpiralError::InvalidRadiusFactor(0.0))
        );
        assert!(matches!(
            advance(s, f64::NAN, 1.0),
            Err(SpiralError::InvalidStep(_))
        ));
        assert!(matches!(
            advance(s, 1.0, f64::INFINITY),
            Err(SpiralError::InvalidRadiusFactor(_))
        ));
    }

    #[test]
    fn test_advance_rejects_degenerate_state() {
        let at_origin = SpiralState {
            theta: 0.6,
            radius: 0.0,
        };
        assert_eq!(
            advance(at_origin, 1.0, 10.0),
            Err(SpiralError::InvalidState {
                theta: 0.6,
                radius: 0.0
            })
        );

        let negative = SpiralState {
            theta: 0.6,
            radius: -4.0,
        };
        assert!(matches!(
            advance(negative, 1.0, 10.0),
            Err(SpiralError::InvalidState { .. })
        ));

        let runaway = SpiralState {
            theta: f64::INFINITY,
            radius: 3.0,
        };
        assert!(matches!(
            advance(runaway, 1.0, 10.0),
            Err(SpiralError::InvalidState { .. })
        ));

        let no_radius = SpiralState {
            theta: 0.6,
            radius: f64::NAN,
        };
        assert!(matches!(
            advance(no_radius, 1.0, 10.0),
            Err(SpiralError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_first_index_to_pixel() {
        let (_, angle, radius) = advance(SpiralState::initial(10.0), 1.0, 10.0).unwrap();
        let p = to_cartesian((0.0, 0.0), angle, 0.0, radius);
        let expected = Pixel {
            x: (6.0 * 0.6f64.cos()).round() as i64,
            y: (6.0 * 0.6f64.sin()).round() as i64,
        };
        assert_eq!(p, expected);
        assert_eq!(p, Pixel { x: 5, y: 3 });
    }

    #[test]
    fn test_to_cartesian_center_and_rotation() {
        assert_eq!(
            to_cartesian((100.0, 50.0), 0.0, 0.0, 10.0),
            Pixel { x: 110, y: 50 }
        );
        // rotation is added to the angle
        assert_eq!(
            to_cartesian((100.0, 50.0), -1.0, 1.0, 10.0),
            Pixel { x: 110, y: 50 }
        );
        assert_eq!(
            to_cartesian((0.0, 0.0), std::f64::consts::FRAC_PI_2, 0.0, 4.0),
            Pixel { x: 0, y: 4 }
        );
    }

    #[test]
    fn test_walk_matches_repeated_advance() {
        let params = SpiralParams::new(3.0, 2.0).unwrap();
        let mut state = SpiralState::initial(2.0);
        for (index, angle, radius) in SpiralWalk::new(params).take(50) {
            let (next, a, r) = state.advance(&params);
            assert!(index >= 1);
            assert_eq!(angle, a);
            assert_eq!(radius, r);
            state = next;
        }
        let first = SpiralWalk::new(params).next().unwrap();
        assert_eq!(first.0, 1);
    }

    #[test]
    fn test_estimate_respects_cap() {
        assert_eq!(estimate_count_within_radius(1.0, 1.0, 1e9, 500).unwrap(), 500);
        assert_eq!(estimate_count_within_radius(1.0, 1.0, 1e9, 1).unwrap(), 1);
    }

    #[test]
    fn test_estimate_tiny_radius() {
        // initial radius 6.0 is already past 5.0
        assert_eq!(estimate_count_within_radius(1.0, 10.0, 5.0, 1_000).unwrap(), 1);
        assert_eq!(estimate_count_within_radius(1.0, 10.0, 6.5, 1_000).unwrap(), 2);
    }

    #[test]
    fn test_estimate_rejects_bad_params() {
        assert!(estimate_count_within_radius(0.0, 1.0, 100.0, 10).is_err());
        assert!(estimate_count_within_radius(1.0, -1.0, 100.0, 10).is_err());
    }

    #[test]
    fn test_curve_stays_inside_diagonal() {
        let diagonal = 200.0;
        let curve = draw_spiral_curve(300.0, 200.0, 4.0, diagonal).unwrap();
        assert_eq!(curve[0], Pixel { x: 300, y: 200 });
        assert!(curve.len() > 10);
        for p in &curve {
            let dx = (p.x - 300) as f64;
            let dy = (p.y - 200) as f64;
            assert!((dx * dx + dy * dy).sqrt() <= diagonal + 1.0);
        }
    }

    #[test]
    fn test_curve_rejects_infinite_diagonal() {
        assert!(draw_spiral_curve(0.0, 0.0, 1.0, f64::INFINITY).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_estimate_monotone_in_radius(
            step in 0.5f64..20.0,
            radius_factor in 0.5f64..20.0,
            r1 in 0.0f64..2_000.0,
            extra in 0.0f64..2_000.0,
        ) {
            let small = estimate_count_within_radius(step, radius_factor, r1, 100_000).unwrap();
            let large = estimate_count_within_radius(step, radius_factor, r1 + extra, 100_000).unwrap();
            prop_assert!(small <= large);
        }

        #[test]
        fn prop_theta_increases_radius_grows(
            step in 0.1f64..20.0,
            radius_factor in 0.1f64..20.0,
        ) {
            let params = SpiralParams::new(step, radius_factor).unwrap();
            let mut state = SpiralState::initial(radius_factor);
            for _ in 0..200 {
                let (next, _, _) = state.advance(&params);
                prop_assert!(next.theta > state.theta);
                prop_assert!(next.radius >= state.radius);
                state = next;
            }
        }
    }
}
