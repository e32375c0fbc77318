//! 2D camera that follows the player
//!
//! World space is +Y up with `pixels_per_unit` CSS pixels per unit. Screen
//! space is the canvas' CSS pixel space (+Y down, origin top-left).

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the canvas center
    pub center: Vec2,
    /// Canvas size in CSS pixels
    viewport: Vec2,
    pixels_per_unit: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32, pixels_per_unit: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            viewport: Vec2::new(width.max(1.0), height.max(1.0)),
            pixels_per_unit: pixels_per_unit.max(f32::EPSILON),
        }
    }

    /// Keep the camera centered on `target`
    pub fn follow(&mut self, target: Vec2) {
        self.center = target;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Canvas CSS pixels to world units
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let offset = (screen - self.viewport * 0.5) / self.pixels_per_unit;
        self.center + Vec2::new(offset.x, -offset.y)
    }

    /// World units to canvas CSS pixels
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let offset = (world - self.center) * self.pixels_per_unit;
        self.viewport * 0.5 + Vec2::new(offset.x, -offset.y)
    }

    /// World units to normalized device coordinates (-1..1, +Y up)
    pub fn world_to_ndc(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.pixels_per_unit / (self.viewport * 0.5)
    }

    /// Half extents of the visible area in world units
    pub fn half_extents(&self) -> Vec2 {
        self.viewport * 0.5 / self.pixels_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        let mut camera = Camera::new(800.0, 600.0, 50.0);
        camera.follow(Vec2::new(2.0, 1.0));
        camera
    }

    #[test]
    fn test_canvas_center_is_camera_center() {
        let camera = camera();
        assert_eq!(camera.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::new(2.0, 1.0));
        assert_eq!(camera.world_to_ndc(Vec2::new(2.0, 1.0)), Vec2::ZERO);
    }

    #[test]
    fn test_screen_y_is_flipped() {
        let camera = camera();
        // 50px right and 100px up from center
        let world = camera.screen_to_world(Vec2::new(450.0, 200.0));
        assert!((world - Vec2::new(3.0, 3.0)).length() < 1e-6);
    }

    #[test]
    fn test_screen_world_round_trip() {
        let camera = camera();
        let world = Vec2::new(-7.25, 4.5);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!((back - world).length() < 1e-4);
    }

    #[test]
    fn test_ndc_edges() {
        let camera = camera();
        let right_edge = camera.center + Vec2::new(camera.half_extents().x, 0.0);
        assert!((camera.world_to_ndc(right_edge) - Vec2::new(1.0, 0.0)).length() < 1e-6);
        let top_edge = camera.center + Vec2::new(0.0, camera.half_extents().y);
        assert!((camera.world_to_ndc(top_edge) - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_resize_ignores_empty_viewport() {
        let mut camera = camera();
        camera.resize(0.0, 300.0);
        assert_eq!(camera.viewport(), Vec2::new(800.0, 600.0));
        camera.resize(1024.0, 768.0);
        assert_eq!(camera.viewport(), Vec2::new(1024.0, 768.0));
    }
}
