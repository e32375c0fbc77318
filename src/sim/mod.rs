//! Simulation module
//!
//! Input sampling, kinematics and the math evaluator. This module must stay
//! free of rendering and platform dependencies:
//! - Variable dt, supplied by the loop driver
//! - Math queries are pure (no frame counters, no caches)

pub mod input;
pub mod math;
pub mod snapshot;
pub mod state;

pub use input::{FrameInputs, InputState, MoveKey};
pub use math::{
    Alignment, LerpPolicy, angle_to, approach, direction, dot, lerp, lerp_vec, normalize,
    normalize_angle, point_at_angle, point_at_offset, rotate, rotate_points,
};
pub use snapshot::{DotReading, MathSnapshot, PolarPoint, evaluate};
pub use state::{Entity, Target};
