//! Math evaluator primitives
//!
//! Every function here is pure and total: degenerate geometry (coincident
//! points, zero-length vectors) resolves to a documented fallback value
//! instead of an error, so nothing downstream has to handle NaN.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::consts::REFERENCE_FPS;
use crate::error::ConfigError;

/// Unit vector in the direction of `v`, or zero for a zero-length input
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let length = (v.x * v.x + v.y * v.y).sqrt();
    if length == 0.0 {
        Vec2::ZERO
    } else {
        Vec2::new(v.x / length, v.y / length)
    }
}

/// Angle from `origin` to `target`, measured from +X, in (-π, π].
///
/// Coincident points give 0. A raw `atan2` of -π (negative-zero dy) is
/// reported as +π so the range stays half-open at the bottom.
#[inline]
pub fn angle_to(origin: Vec2, target: Vec2) -> f32 {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let angle = dy.atan2(dx);
    if angle == -PI { PI } else { angle }
}

/// Unit vector at `angle` radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Rotate `point` counterclockwise by `angle` about `pivot` (origin when `None`)
#[inline]
pub fn rotate(point: Vec2, angle: f32, pivot: Option<Vec2>) -> Vec2 {
    let pivot = pivot.unwrap_or(Vec2::ZERO);
    let local = point - pivot;
    let (sin_a, cos_a) = angle.sin_cos();
    let rotated = Vec2::new(
        local.x * cos_a - local.y * sin_a,
        local.x * sin_a + local.y * cos_a,
    );
    rotated + pivot
}

/// Rotate every point of a shape by the same angle and pivot
pub fn rotate_points(points: &[Vec2], angle: f32, pivot: Option<Vec2>) -> Vec<Vec2> {
    points.iter().map(|&p| rotate(p, angle, pivot)).collect()
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// One ease-out step: move `fraction` of the remaining distance
#[inline]
pub fn approach(current: Vec2, target: Vec2, fraction: f32) -> Vec2 {
    lerp_vec(current, target, fraction.clamp(0.0, 1.0))
}

/// Polar to cartesian around `origin`
#[inline]
pub fn point_at_angle(origin: Vec2, angle: f32, distance: f32) -> Vec2 {
    Vec2::new(
        origin.x + angle.cos() * distance,
        origin.y + angle.sin() * distance,
    )
}

/// Polar placement relative to a base direction (spread shots, orbit slots)
#[inline]
pub fn point_at_offset(origin: Vec2, base_angle: f32, offset: f32, distance: f32) -> Vec2 {
    point_at_angle(origin, base_angle + offset, distance)
}

/// Fold an angle into [-π, π) for display
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { -PI } else { wrapped - PI }
}

/// Sign classification of a dot product between unit vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    /// Pointing roughly the same way (in front)
    Ahead,
    /// About 90 degrees apart
    Perpendicular,
    /// Pointing roughly opposite ways (behind)
    Behind,
}

impl Alignment {
    pub fn classify(dot: f32, epsilon: f32) -> Self {
        if dot > epsilon {
            Alignment::Ahead
        } else if dot < -epsilon {
            Alignment::Behind
        } else {
            Alignment::Perpendicular
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Ahead => "in front",
            Alignment::Perpendicular => "perpendicular",
            Alignment::Behind => "behind",
        }
    }
}

/// How the lerp marker's `t` evolves over a cycle.
///
/// `t` is a pure function of elapsed time, so re-evaluating a frame never
/// drifts. Each cycle starts at A (t = 0), rises monotonically without
/// passing 1, then wraps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LerpPolicy {
    /// Constant speed: t goes 0 -> 1 over `period` seconds
    Linear { period: f32 },
    /// Move `fraction` of the remaining distance every reference frame
    EaseOut { fraction: f32, period: f32 },
}

impl Default for LerpPolicy {
    fn default() -> Self {
        LerpPolicy::Linear { period: 2.5 }
    }
}

impl LerpPolicy {
    /// Cycle length in seconds
    pub fn period(&self) -> f32 {
        match *self {
            LerpPolicy::Linear { period } | LerpPolicy::EaseOut { period, .. } => period,
        }
    }

    /// Interpolation parameter at `elapsed` seconds since start
    pub fn t_at(&self, elapsed: f64) -> f32 {
        let period = self.period();
        if !(period > 0.0) {
            return 1.0;
        }
        let phase = elapsed.max(0.0).rem_euclid(period as f64) as f32;

        let t = match *self {
            LerpPolicy::Linear { .. } => phase / period,
            LerpPolicy::EaseOut { fraction, .. } => {
                // Closed form of `t = lerp(t, 1, fraction)` applied once per frame
                let frames = phase * REFERENCE_FPS;
                1.0 - (1.0 - fraction.clamp(0.0, 1.0)).powf(frames)
            }
        };
        t.clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let period = self.period();
        if !(period.is_finite() && period > 0.0) {
            return Err(ConfigError::Invalid {
                field: "lerp.period",
                reason: "must be a positive number",
            });
        }
        if let LerpPolicy::EaseOut { fraction, .. } = *self {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(ConfigError::Invalid {
                    field: "lerp.fraction",
                    reason: "must be in (0, 1]",
                });
            }
        }
        Ok(())
    }
}
