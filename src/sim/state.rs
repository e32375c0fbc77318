//! Kinematic state: the player entity and the pointer target

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::input::FrameInputs;
use super::math::{angle_to, direction, normalize};
use crate::config::DemoConfig;

/// The controllable player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub position: Vec2,
    /// Facing angle in radians (any range; normalize for display)
    pub facing: f32,
    /// World units per second
    pub speed: f32,
}

impl Entity {
    pub fn new(position: Vec2, facing: f32, speed: f32) -> Self {
        Self {
            position,
            facing,
            speed,
        }
    }

    pub fn from_config(config: &DemoConfig) -> Self {
        Self::new(config.start_position, config.start_facing, config.speed)
    }

    /// Unit vector along the facing angle
    pub fn forward(&self) -> Vec2 {
        direction(self.facing)
    }

    /// Advance one frame.
    ///
    /// Movement is normalized here, so diagonals move at `speed` like axes
    /// do. Facing is re-derived from position and target every call; with
    /// zero dt the position is untouched and the facing recomputation is
    /// idempotent.
    pub fn advance(&mut self, inputs: &FrameInputs) {
        if inputs.dt_seconds > 0.0 {
            self.position += normalize(inputs.movement) * self.speed * inputs.dt_seconds;
        }
        self.face(inputs.target_position);
    }

    /// Turn to face `target` (coincident points face +X, like `angle_to`)
    pub fn face(&mut self, target: Vec2) {
        self.facing = angle_to(self.position, target);
    }
}

/// Pointer target in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Target {
    pub position: Vec2,
}

impl Target {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn from_inputs(inputs: &FrameInputs) -> Self {
        Self::new(inputs.target_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn inputs(movement: Vec2, target: Vec2, dt: f32) -> FrameInputs {
        FrameInputs {
            movement,
            target_position: target,
            dt_seconds: dt,
        }
    }

    #[test]
    fn test_axis_movement() {
        let mut entity = Entity::new(Vec2::ZERO, 0.0, 5.0);
        entity.advance(&inputs(Vec2::Y, Vec2::new(0.0, 100.0), 0.5));
        assert!((entity.position - Vec2::new(0.0, 2.5)).length() < 1e-6);
    }

    #[test]
    fn test_diagonal_speed_matches_axis_speed() {
        let mut axis = Entity::new(Vec2::ZERO, 0.0, 5.0);
        let mut diagonal = axis;
        axis.advance(&inputs(Vec2::X, Vec2::new(10.0, 10.0), 0.2));
        diagonal.advance(&inputs(Vec2::new(1.0, 1.0), Vec2::new(10.0, 10.0), 0.2));
        assert!((axis.position.length() - diagonal.position.length()).abs() < 1e-5);
        assert!((diagonal.position.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_faces_target_after_move() {
        let mut entity = Entity::new(Vec2::new(2.0, 1.0), 0.0, 5.0);
        entity.advance(&inputs(Vec2::ZERO, Vec2::new(5.0, 4.0), 0.016));
        assert!((entity.facing - FRAC_PI_4).abs() < 1e-6);

        // Moving right under a fixed target changes the facing
        entity.advance(&inputs(Vec2::X, Vec2::new(5.0, 4.0), 0.6));
        assert!((entity.position - Vec2::new(5.0, 1.0)).length() < 1e-5);
        assert!((entity.facing - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dt_keeps_position() {
        let start = Vec2::new(-1.0, 3.0);
        let mut entity = Entity::new(start, 0.0, 5.0);
        entity.advance(&inputs(Vec2::new(1.0, -1.0), Vec2::new(-1.0, 10.0), 0.0));
        assert_eq!(entity.position, start);
        assert!((entity.facing - FRAC_PI_2).abs() < 1e-6);

        let before = entity;
        entity.advance(&inputs(Vec2::ZERO, Vec2::new(-1.0, 10.0), 0.0));
        assert_eq!(entity, before);
    }

    #[test]
    fn test_coincident_target_faces_positive_x() {
        let mut entity = Entity::new(Vec2::new(1.0, 1.0), 1.0, 5.0);
        entity.advance(&inputs(Vec2::ZERO, Vec2::new(1.0, 1.0), 0.016));
        assert_eq!(entity.facing, 0.0);
        assert!(entity.forward().is_finite());
    }

    #[test]
    fn test_from_config() {
        let config = DemoConfig::default();
        let entity = Entity::from_config(&config);
        assert_eq!(entity.position, Vec2::new(2.0, 1.0));
        assert_eq!(entity.speed, 5.0);
        assert_eq!(
            Target::from_inputs(&inputs(Vec2::ZERO, Vec2::ONE, 0.0)).position,
            Vec2::ONE
        );
    }
}
