//! Input sampling
//!
//! The host pushes key and pointer events into an [`InputState`]; the loop
//! samples it once per frame into [`FrameInputs`].

use glam::Vec2;

use crate::camera::Camera;

/// The four movement directions (WASD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    /// Map a DOM `KeyboardEvent.code` or `.key` value to a movement key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "w" | "W" | "ArrowUp" => Some(MoveKey::Up),
            "KeyS" | "s" | "S" | "ArrowDown" => Some(MoveKey::Down),
            "KeyA" | "a" | "A" | "ArrowLeft" => Some(MoveKey::Left),
            "KeyD" | "d" | "D" | "ArrowRight" => Some(MoveKey::Right),
            _ => None,
        }
    }

    /// Unit contribution in world space (+Y up)
    pub fn direction(&self) -> Vec2 {
        match self {
            MoveKey::Up => Vec2::Y,
            MoveKey::Down => Vec2::NEG_Y,
            MoveKey::Left => Vec2::NEG_X,
            MoveKey::Right => Vec2::X,
        }
    }

    fn index(&self) -> usize {
        match self {
            MoveKey::Up => 0,
            MoveKey::Down => 1,
            MoveKey::Left => 2,
            MoveKey::Right => 3,
        }
    }
}

/// Everything the simulation reads for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Raw sum of held directions; each axis in {-1, 0, 1}, NOT normalized
    pub movement: Vec2,
    /// Pointer position in world space
    pub target_position: Vec2,
    /// Seconds since the previous frame (>= 0)
    pub dt_seconds: f32,
}

/// Held keys and pointer, accumulated from host events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: [bool; 4],
    /// Latest pointer position in canvas CSS pixels (None when outside)
    pointer: Option<Vec2>,
    /// Target used while the pointer is unknown
    last_target: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the code is a movement key (host may prevent default)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.set_key(code, false)
    }

    fn set_key(&mut self, code: &str, held: bool) -> bool {
        match MoveKey::from_code(code) {
            Some(key) => {
                self.held[key.index()] = held;
                true
            }
            None => false,
        }
    }

    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held[key.index()]
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pointer = Some(Vec2::new(x, y));
        }
    }

    /// Pointer left the canvas; the target freezes at its last world position
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Focus lost: keyup events will never arrive for keys held now
    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    /// Raw movement vector (diagonals have length sqrt(2))
    pub fn movement(&self) -> Vec2 {
        [MoveKey::Up, MoveKey::Down, MoveKey::Left, MoveKey::Right]
            .iter()
            .filter(|key| self.is_held(**key))
            .map(MoveKey::direction)
            .sum()
    }

    /// Sample the current state for one frame.
    ///
    /// The pointer is converted through `camera` as positioned this frame,
    /// so a still mouse over a moving (followed) player yields a moving target.
    pub fn sample(&mut self, camera: &Camera, dt_seconds: f32) -> FrameInputs {
        if let Some(pointer) = self.pointer {
            self.last_target = camera.screen_to_world(pointer);
        }
        FrameInputs {
            movement: self.movement(),
            target_position: self.last_target,
            dt_seconds: if dt_seconds.is_finite() {
                dt_seconds.max(0.0)
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(400.0, 400.0, 50.0)
    }

    #[test]
    fn test_no_input_defaults() {
        let mut input = InputState::new();
        let sample = input.sample(&camera(), 0.016);
        assert_eq!(sample.movement, Vec2::ZERO);
        assert_eq!(sample.target_position, Vec2::ZERO);
        assert_eq!(sample.dt_seconds, 0.016);
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(MoveKey::from_code("KeyW"), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_code("a"), Some(MoveKey::Left));
        assert_eq!(MoveKey::from_code("ArrowRight"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_code("Space"), None);

        let mut input = InputState::new();
        assert!(input.key_down("KeyS"));
        assert!(!input.key_down("Enter"));
        assert!(input.is_held(MoveKey::Down));
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let mut input = InputState::new();
        input.key_down("KeyW");
        input.key_down("KeyD");
        let sample = input.sample(&camera(), 0.016);
        assert_eq!(sample.movement, Vec2::new(1.0, 1.0));
        assert!((sample.movement.length() - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputState::new();
        input.key_down("KeyA");
        input.key_down("KeyD");
        input.key_down("KeyW");
        assert_eq!(input.movement(), Vec2::new(0.0, 1.0));
        input.key_up("KeyW");
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down("KeyW");
        input.key_down("KeyA");
        input.release_all();
        assert_eq!(input.movement(), Vec2::ZERO);
    }

    #[test]
    fn test_pointer_converts_to_world() {
        let mut input = InputState::new();
        let mut camera = camera();
        camera.follow(Vec2::new(2.0, 1.0));
        input.pointer_moved(350.0, 50.0); // 150px right, 150px up
        let sample = input.sample(&camera, 0.0);
        assert!((sample.target_position - Vec2::new(5.0, 4.0)).length() < 1e-6);
    }

    #[test]
    fn test_target_sticks_after_pointer_leaves() {
        let mut input = InputState::new();
        let mut camera = camera();
        input.pointer_moved(250.0, 200.0);
        let first = input.sample(&camera, 0.0).target_position;
        input.pointer_left();
        camera.follow(Vec2::new(10.0, 10.0));
        let second = input.sample(&camera, 0.0).target_position;
        assert_eq!(first, second);
        assert_eq!(second, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_bad_dt_clamps_to_zero() {
        let mut input = InputState::new();
        assert_eq!(input.sample(&camera(), -1.0).dt_seconds, 0.0);
        assert_eq!(input.sample(&camera(), f32::NAN).dt_seconds, 0.0);
    }
}
