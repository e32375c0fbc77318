//! Loop driver
//!
//! Each tick: clock -> sample input -> advance kinematics -> evaluate math ->
//! build frame -> present. The host decides when ticks happen (usually
//! requestAnimationFrame); stopping is simply not ticking any more.

use glam::Vec2;

use crate::camera::Camera;
use crate::config::DemoConfig;
use crate::consts::MAX_FRAME_DT;
use crate::error::EngineError;
use crate::renderer::{FrameRenderer, FrameSurface, Presented, Readout};
use crate::sim::{Entity, InputState, MathSnapshot, Target, evaluate};

/// Whether the engine accepts ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Maps host timestamps (milliseconds) to simulation time (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    /// Record a timestamp and return the clamped delta in seconds.
    ///
    /// The first call yields 0. Deltas are clamped to [0, MAX_FRAME_DT] so a
    /// backgrounded tab doesn't teleport the player.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.elapsed += dt as f64;
        dt
    }

    /// Simulation seconds since the first tick
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// A running demo session
pub struct Engine<S: FrameSurface> {
    config: DemoConfig,
    state: LoopState,
    surface: Option<S>,
    clock: FrameClock,
    input: InputState,
    camera: Camera,
    entity: Entity,
    target: Target,
    renderer: FrameRenderer,
    readouts: Vec<Readout>,
    frames: u64,
}

impl<S: FrameSurface> Engine<S> {
    /// Take ownership of the drawing surface and seed the player.
    ///
    /// `width`/`height` are the canvas size in CSS pixels.
    pub fn start(
        surface: S,
        config: DemoConfig,
        width: f32,
        height: f32,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let entity = Entity::from_config(&config);
        let mut camera = Camera::new(width, height, config.pixels_per_unit);
        camera.follow(entity.position);

        log::info!(
            "Engine started: player at ({:.2}, {:.2}), {}x{} css px",
            entity.position.x,
            entity.position.y,
            width,
            height
        );

        Ok(Self {
            renderer: FrameRenderer::new(&config),
            config,
            state: LoopState::Running,
            surface: Some(surface),
            clock: FrameClock::default(),
            input: InputState::new(),
            camera,
            entity,
            target: Target::default(),
            readouts: Vec::new(),
            frames: 0,
        })
    }

    /// Run one frame at host time `now_ms`.
    ///
    /// A surface failure stops the engine and is returned; there is no retry.
    pub fn tick(&mut self, now_ms: f64) -> Result<Presented, EngineError> {
        if self.state != LoopState::Running {
            return Err(EngineError::NotRunning);
        }
        let Some(surface) = self.surface.as_mut() else {
            return Err(EngineError::NotRunning);
        };

        let dt = self.clock.advance(now_ms);

        // Camera follows the player as it stood at the start of the frame
        self.camera.follow(self.entity.position);
        let inputs = self.input.sample(&self.camera, dt);

        self.entity.advance(&inputs);
        self.target = Target::from_inputs(&inputs);

        let snapshot = evaluate(&self.entity, &self.target, self.clock.elapsed(), &self.config);
        let frame = self
            .renderer
            .render(&snapshot, &self.entity, &self.target, &self.camera);

        match surface.present(&frame) {
            Ok(presented) => {
                log::trace!("Frame {} ({} vertices)", self.frames, frame.vertices.len());
                self.frames += 1;
                self.readouts = frame.readouts;
                Ok(presented)
            }
            Err(e) => {
                log::error!("Frame failed, stopping demo: {e}");
                self.stop();
                Err(e)
            }
        }
    }

    /// Stop ticking and release the drawing surface
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::info!("Engine stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
        self.surface = None;
    }

    /// Canvas resized: CSS size for the camera, physical size for the surface
    pub fn resize(&mut self, css_width: f32, css_height: f32, physical_width: u32, physical_height: u32) {
        self.camera.resize(css_width, css_height);
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(physical_width, physical_height);
        }
    }

    /// Recompute the math for the current state (does not advance anything)
    pub fn snapshot(&self) -> MathSnapshot {
        evaluate(&self.entity, &self.target, self.clock.elapsed(), &self.config)
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Readouts of the last presented frame
    pub fn readouts(&self) -> &[Readout] {
        &self.readouts
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Player position in canvas CSS pixels (for anchoring host labels)
    pub fn player_on_screen(&self) -> Vec2 {
        self.camera.world_to_screen(self.entity.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessSurface;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn engine() -> Engine<HeadlessSurface> {
        Engine::start(HeadlessSurface::new(800, 600), DemoConfig::default(), 800.0, 600.0)
            .unwrap()
    }

    #[test]
    fn test_clock_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(5000.0), 0.0);
        let dt = clock.advance(5000.0 + FRAME_MS);
        assert!((dt - 1.0 / 60.0).abs() < 1e-6);
        assert!((clock.elapsed() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_clock_clamps() {
        let mut clock = FrameClock::default();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_FRAME_DT);
        // Time going backwards never runs the simulation in reverse
        assert_eq!(clock.advance(9_000.0), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
    }

    #[test]
    fn test_start_seeds_player() {
        let engine = engine();
        assert!(engine.is_running());
        assert_eq!(engine.entity().position, Vec2::new(2.0, 1.0));
        assert_eq!(engine.frames(), 0);
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let config = DemoConfig {
            speed: f32::NAN,
            ..Default::default()
        };
        let result = Engine::start(HeadlessSurface::new(1, 1), config, 1.0, 1.0);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_tick_presents_and_records_readouts() {
        let mut engine = engine();
        assert_eq!(engine.tick(0.0).unwrap(), Presented::Shown);
        assert_eq!(engine.frames(), 1);
        let surface = engine.surface().unwrap();
        assert_eq!(surface.frames_presented, 1);
        assert!(surface.last_vertex_count > 0);
        assert!(engine.readouts().iter().any(|r| r.key == "atan2"));
    }

    #[test]
    fn test_held_key_moves_player_at_speed() {
        let mut engine = engine();
        engine.tick(0.0).unwrap();
        engine.input_mut().key_down("KeyD");
        for i in 1..=30 {
            engine.tick(i as f64 * FRAME_MS).unwrap();
        }
        // Half a second at 5 units/s
        let pos = engine.entity().position;
        assert!((pos.x - 4.5).abs() < 1e-3, "{pos:?}");
        assert!((pos.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_moves_at_same_speed() {
        let mut engine = engine();
        engine.tick(0.0).unwrap();
        engine.input_mut().key_down("KeyW");
        engine.input_mut().key_down("KeyA");
        engine.tick(100.0).unwrap();
        let moved = engine.entity().position - Vec2::new(2.0, 1.0);
        assert!((moved.length() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_player_faces_pointer() {
        let mut engine = engine();
        // Canvas center is the player; 150px right and 150px up is (5, 4)
        engine.input_mut().pointer_moved(550.0, 150.0);
        engine.tick(0.0).unwrap();
        assert!((engine.target().position - Vec2::new(5.0, 4.0)).length() < 1e-5);
        assert!((engine.entity().facing - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        let snapshot = engine.snapshot();
        assert!((snapshot.dot.value - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_query_is_idempotent() {
        let mut engine = engine();
        engine.input_mut().pointer_moved(100.0, 420.0);
        engine.tick(0.0).unwrap();
        engine.tick(FRAME_MS).unwrap();
        assert_eq!(engine.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_surface_loss_stops_engine() {
        let surface = HeadlessSurface::new(800, 600).losing_after(2);
        let mut engine = Engine::start(surface, DemoConfig::default(), 800.0, 600.0).unwrap();
        engine.tick(0.0).unwrap();
        engine.tick(FRAME_MS).unwrap();
        let err = engine.tick(2.0 * FRAME_MS).unwrap_err();
        assert!(matches!(err, EngineError::SurfaceLost));
        assert!(err.is_fatal());
        assert_eq!(engine.state(), LoopState::Stopped);
        assert!(engine.surface().is_none());
        assert_eq!(engine.frames(), 2);
    }

    #[test]
    fn test_tick_after_stop() {
        let mut engine = engine();
        engine.tick(0.0).unwrap();
        engine.stop();
        assert!(engine.surface().is_none());
        let err = engine.tick(FRAME_MS).unwrap_err();
        assert!(matches!(err, EngineError::NotRunning));
        assert!(!err.is_fatal());
        // Stopping twice is harmless
        engine.stop();
        assert_eq!(engine.state(), LoopState::Stopped);
    }

    #[test]
    fn test_resize_updates_camera_and_surface() {
        let mut engine = engine();
        engine.resize(400.0, 300.0, 800, 600);
        assert_eq!(engine.camera().viewport(), Vec2::new(400.0, 300.0));
        assert_eq!(engine.surface().unwrap().size, (800, 600));
    }

    #[test]
    fn test_player_on_screen_is_canvas_center_before_moving() {
        let mut engine = engine();
        engine.tick(0.0).unwrap();
        assert_eq!(engine.player_on_screen(), Vec2::new(400.0, 300.0));
    }
}
