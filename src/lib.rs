//! Vecmath Demo - interactive 2D vector math for game programmers
//!
//! Core modules:
//! - `sim`: Input sampling, kinematics and the pure math evaluator
//! - `camera`: Screen/world/clip space conversions (camera follows the player)
//! - `renderer`: Frame building and the WebGPU pipeline
//! - `engine`: Loop driver (start / tick / stop)
//! - `config`: Data-driven demo tuning
//! - `web`: wasm-bindgen surface for the host page (wasm32 only)

pub mod camera;
pub mod config;
pub mod engine;
pub mod error;
pub mod renderer;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use camera::Camera;
pub use config::DemoConfig;
pub use engine::{Engine, LoopState};
pub use error::{ConfigError, EngineError};
pub use sim::LerpPolicy;

/// Demo configuration constants
pub mod consts {
    use glam::Vec2;

    /// Pixels per world unit
    pub const SCALE: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(2.0, 1.0);
    pub const PLAYER_SPEED: f32 = 5.0; // world units per second

    /// Largest frame delta fed to the simulation (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Frame rate the ease-out lerp fraction is defined against
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Polar spread defaults
    pub const POLAR_DISTANCE: f32 = 3.5;
    pub const POLAR_OFFSET_DEG: f32 = 45.0;

    /// |dot| at or below this counts as perpendicular
    pub const DOT_EPSILON: f32 = 1e-3;

    /// Background grid half size in world units
    pub const GRID_HALF_SIZE: i32 = 20;
}
