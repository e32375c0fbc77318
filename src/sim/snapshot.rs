//! Per-frame math snapshot
//!
//! Everything the renderer shows is computed here, fresh every frame, from
//! the entity, the target and the elapsed session time.

use glam::Vec2;

use super::math::{
    Alignment, angle_to, direction, dot, lerp_vec, normalize, point_at_offset, rotate_points,
};
use super::state::{Entity, Target};
use crate::config::DemoConfig;

/// A dot product between two unit vectors and its sign class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotReading {
    pub value: f32,
    pub alignment: Alignment,
}

impl DotReading {
    pub fn new(a: Vec2, b: Vec2, epsilon: f32) -> Self {
        let value = dot(a, b);
        Self {
            value,
            alignment: Alignment::classify(value, epsilon),
        }
    }
}

/// One marker of the polar spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Offset from the angle-to-target (radians)
    pub offset: f32,
    /// Final angle (base + offset)
    pub angle: f32,
    pub position: Vec2,
}

/// All derived quantities for one frame (immutable once built)
#[derive(Debug, Clone, PartialEq)]
pub struct MathSnapshot {
    // === atan2 ===
    /// Angle from entity to target, (-π, π]
    pub angle: f32,
    pub distance: f32,
    /// Player X/Y components (the legs of the right triangle to the origin)
    pub components: Vec2,

    // === Rotation ===
    /// Shape outline rotated by the facing angle, in world space
    pub rotated_shape: Vec<Vec2>,

    // === Dot product ===
    /// Unit facing vector
    pub forward: Vec2,
    /// Unit vector toward the target (zero when coincident)
    pub to_target: Vec2,
    /// forward · to_target
    pub dot: DotReading,
    /// forward · (unit vector toward the world origin)
    pub origin_probe: DotReading,
    /// Unit vector from the world origin toward the entity
    pub look_at_player: Vec2,

    // === Lerp ===
    pub lerp_start: Vec2,
    pub lerp_end: Vec2,
    pub lerp_t: f32,
    pub lerp_point: Vec2,

    // === Polar ===
    pub polar_points: Vec<PolarPoint>,
}

/// Evaluate every concept for the current frame
pub fn evaluate(
    entity: &Entity,
    target: &Target,
    elapsed_seconds: f64,
    config: &DemoConfig,
) -> MathSnapshot {
    let origin = entity.position;
    let angle = angle_to(origin, target.position);
    let delta = target.position - origin;

    // Local shape placed at the entity, then spun about it
    let placed: Vec<Vec2> = config.shape.iter().map(|&p| p + origin).collect();
    let rotated_shape = rotate_points(&placed, entity.facing, Some(origin));

    let forward = direction(entity.facing);
    let to_target = normalize(delta);
    let to_origin = normalize(-origin);

    let lerp_t = config.lerp.t_at(elapsed_seconds);

    let polar_points = config
        .polar_offsets()
        .map(|offset| PolarPoint {
            offset,
            angle: angle + offset,
            position: point_at_offset(origin, angle, offset, config.polar_distance),
        })
        .collect();

    MathSnapshot {
        angle,
        distance: delta.length(),
        components: origin,

        rotated_shape,

        forward,
        to_target,
        dot: DotReading::new(forward, to_target, config.dot_epsilon),
        origin_probe: DotReading::new(forward, to_origin, config.dot_epsilon),
        look_at_player: normalize(origin),

        lerp_start: origin,
        lerp_end: target.position,
        lerp_t,
        lerp_point: lerp_vec(origin, target.position, lerp_t),

        polar_points,
    }
}
