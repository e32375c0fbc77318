//! Frame builder
//!
//! Turns a [`MathSnapshot`] into world-space triangles and text readouts.
//! Pure consumer: nothing here mutates the simulation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::camera::Camera;
use crate::config::{DemoConfig, Overlays};
use crate::sim::{Alignment, DotReading, Entity, MathSnapshot, Target, normalize_angle};

/// Line thicknesses in world units (50 px per unit by default)
const THIN: f32 = 0.02;
const LINE: f32 = 0.03;
const AXIS: f32 = 0.05;

const PLAYER_RADIUS: f32 = 0.12;
const TARGET_RADIUS: f32 = 0.08;
const MARKER_RADIUS: f32 = 0.1;
const ANGLE_ARC_RADIUS: f32 = 0.6;

/// A labelled line of text for the host page
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub key: &'static str,
    pub text: String,
}

impl Readout {
    fn new(key: &'static str, text: String) -> Self {
        Self { key, text }
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Camera the world-space vertices are viewed through
    pub camera: Camera,
    pub clear_color: [f32; 4],
    /// Triangle list in world space
    pub vertices: Vec<Vertex>,
    pub readouts: Vec<Readout>,
}

impl Frame {
    pub fn readout(&self, key: &str) -> Option<&str> {
        self.readouts
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.text.as_str())
    }
}

/// Color encoding of a dot product's sign
pub fn alignment_color(alignment: Alignment) -> [f32; 4] {
    match alignment {
        Alignment::Ahead => colors::DOT_AHEAD,
        Alignment::Perpendicular => colors::DOT_PERPENDICULAR,
        Alignment::Behind => colors::DOT_BEHIND,
    }
}

/// Builds frames; caches the world-fixed background geometry
pub struct FrameRenderer {
    overlays: Overlays,
    background: Vec<Vertex>,
}

impl FrameRenderer {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            overlays: config.overlays,
            background: background(config),
        }
    }

    pub fn render(
        &self,
        snapshot: &MathSnapshot,
        entity: &Entity,
        target: &Target,
        camera: &Camera,
    ) -> Frame {
        let mut vertices = Vec::with_capacity(self.background.len() + 2048);
        vertices.extend_from_slice(&self.background);

        let player = entity.position;

        if self.overlays.components {
            // Right triangle legs down to the axes
            vertices.extend(shapes::line(
                Vec2::new(player.x, 0.0),
                player,
                LINE,
                colors::COMPONENTS,
            ));
            vertices.extend(shapes::line(
                Vec2::new(0.0, player.y),
                player,
                LINE,
                colors::COMPONENTS,
            ));
        }

        if self.overlays.look_at_player {
            vertices.extend(shapes::line(
                Vec2::ZERO,
                snapshot.look_at_player,
                LINE,
                colors::LOOK_AT_PLAYER,
            ));
            vertices.extend(shapes::line(
                target.position,
                target.position + snapshot.look_at_player,
                LINE,
                colors::LOOK_AT_PLAYER,
            ));
        }

        // Lerp: faded path from player to target plus the moving marker
        vertices.extend(shapes::gradient_line(
            snapshot.lerp_start,
            snapshot.lerp_end,
            LINE * 2.0,
            [colors::LERP_PATH[0], colors::LERP_PATH[1], colors::LERP_PATH[2], 0.0],
            colors::LERP_PATH,
            12,
        ));
        vertices.extend(shapes::marker(
            snapshot.lerp_point,
            MARKER_RADIUS,
            colors::LERP_MARKER,
        ));

        // Polar spread
        for point in &snapshot.polar_points {
            vertices.extend(shapes::line(player, point.position, THIN, colors::POLAR));
            vertices.extend(shapes::marker(point.position, MARKER_RADIUS, colors::POLAR));
        }

        // atan2: +X reference ray and the swept angle
        vertices.extend(shapes::line(
            player,
            player + Vec2::new(ANGLE_ARC_RADIUS + 0.2, 0.0),
            THIN,
            colors::AXES,
        ));
        let sweep = snapshot.angle;
        vertices.extend(shapes::arc_band(
            player,
            ANGLE_ARC_RADIUS - LINE,
            ANGLE_ARC_RADIUS,
            0.0,
            sweep,
            colors::ANGLE_ARC,
            shapes::arc_segments(sweep, 16.0),
        ));

        // Dot product: to-target unit vector colored by sign
        vertices.extend(shapes::line(
            player,
            player + snapshot.to_target,
            AXIS,
            alignment_color(snapshot.dot.alignment),
        ));
        vertices.extend(shapes::line(
            player,
            player + snapshot.to_target,
            LINE * 0.5,
            colors::TO_TARGET,
        ));

        // Rotation: the player shape spun to its facing
        vertices.extend(shapes::fan(&snapshot.rotated_shape, colors::SHAPE_FILL));
        vertices.extend(shapes::polyline(
            &snapshot.rotated_shape,
            THIN,
            colors::SHAPE_OUTLINE,
            true,
        ));

        // Player and target on top
        vertices.extend(shapes::circle(player, PLAYER_RADIUS, colors::PLAYER, 24));
        vertices.extend(shapes::ring(
            player,
            PLAYER_RADIUS,
            PLAYER_RADIUS + 0.03,
            alignment_color(snapshot.origin_probe.alignment),
            24,
        ));
        vertices.extend(shapes::circle(target.position, TARGET_RADIUS, colors::TARGET, 16));

        Frame {
            camera: *camera,
            clear_color: colors::BACKGROUND,
            vertices,
            readouts: readouts(snapshot, entity, target),
        }
    }
}

/// Grid, axes and unit circle (fixed in world space)
fn background(config: &DemoConfig) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    if config.overlays.grid {
        let half = config.grid_half_size as i32;
        let hs = half as f32;
        for i in -half..=half {
            let i = i as f32;
            vertices.extend(shapes::line(
                Vec2::new(i, -hs),
                Vec2::new(i, hs),
                THIN,
                colors::GRID,
            ));
            vertices.extend(shapes::line(
                Vec2::new(-hs, i),
                Vec2::new(hs, i),
                THIN,
                colors::GRID,
            ));
        }
        vertices.extend(shapes::line(
            Vec2::new(-hs, 0.0),
            Vec2::new(hs, 0.0),
            AXIS,
            colors::AXES,
        ));
        vertices.extend(shapes::line(
            Vec2::new(0.0, -hs),
            Vec2::new(0.0, hs),
            AXIS,
            colors::AXES,
        ));
    }

    if config.overlays.unit_circle {
        vertices.extend(shapes::ring(
            Vec2::ZERO,
            1.0 - AXIS * 0.5,
            1.0 + AXIS * 0.5,
            colors::UNIT_CIRCLE,
            64,
        ));
    }

    vertices
}

fn fmt_vec(v: Vec2) -> String {
    format!("({:.2}, {:.2})", v.x, v.y)
}

fn fmt_dot(reading: &DotReading) -> String {
    format!("{:.2} ({})", reading.value, reading.alignment.as_str())
}

fn readouts(snapshot: &MathSnapshot, entity: &Entity, target: &Target) -> Vec<Readout> {
    let delta = target.position - entity.position;
    let facing = normalize_angle(entity.facing);

    let polar = snapshot
        .polar_points
        .iter()
        .map(|p| format!("{:+.0}°: {}", p.offset.to_degrees(), fmt_vec(p.position)))
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        Readout::new("player", format!("Player: {}", fmt_vec(entity.position))),
        Readout::new("target", format!("Mouse World: {}", fmt_vec(target.position))),
        Readout::new(
            "atan2",
            format!(
                "dx = {:.2}, dy = {:.2}, angle = atan2(dy, dx) = {:.3} rad ({:.1}°)",
                delta.x,
                delta.y,
                snapshot.angle,
                snapshot.angle.to_degrees()
            ),
        ),
        Readout::new("distance", format!("Distance: {:.2}", snapshot.distance)),
        Readout::new(
            "rotation",
            format!("Facing: {:.3} rad ({:.1}°)", facing, facing.to_degrees()),
        ),
        Readout::new(
            "to_target",
            format!("To Mouse Unit Vec: {}", fmt_vec(snapshot.to_target)),
        ),
        Readout::new(
            "look_at_player",
            format!("lookAtPlayer Unit Vec: {}", fmt_vec(snapshot.look_at_player)),
        ),
        Readout::new("dot", format!("forward · toMouse = {}", fmt_dot(&snapshot.dot))),
        Readout::new(
            "origin_probe",
            format!("forward · toOrigin = {}", fmt_dot(&snapshot.origin_probe)),
        ),
        Readout::new(
            "lerp",
            format!(
                "lerp(player, mouse, {:.2}) = {}",
                snapshot.lerp_t,
                fmt_vec(snapshot.lerp_point)
            ),
        ),
        Readout::new("polar", format!("Polar spread: {polar}")),
    ]
}
