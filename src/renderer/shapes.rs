//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Scale a color's alpha
fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

fn push_quad(vertices: &mut Vec<Vertex>, quad: [Vec2; 4], colors: [[f32; 4]; 4]) {
    let [a, b, c, d] = quad;
    // Two triangles: a-b-c and c-b-d
    vertices.push(Vertex::new(a.x, a.y, colors[0]));
    vertices.push(Vertex::new(b.x, b.y, colors[1]));
    vertices.push(Vertex::new(c.x, c.y, colors[2]));

    vertices.push(Vertex::new(c.x, c.y, colors[2]));
    vertices.push(Vertex::new(b.x, b.y, colors[1]));
    vertices.push(Vertex::new(d.x, d.y, colors[3]));
}

/// Thick line segment (empty for a zero-length segment)
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (thickness * 0.5);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [from + perp, from - perp, to + perp, to - perp],
        [color; 4],
    );
    vertices
}

/// Line whose color fades from `from_color` to `to_color`, tapering in width
pub fn gradient_line(
    from: Vec2,
    to: Vec2,
    thickness: f32,
    from_color: [f32; 4],
    to_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO || segments == 0 {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let t1 = i as f32 / segments as f32;
        let t2 = (i + 1) as f32 / segments as f32;

        let p1 = from.lerp(to, t1);
        let p2 = from.lerp(to, t2);

        // Narrow at the start, full width at the end
        let width1 = thickness * (0.3 + 0.7 * t1) * 0.5;
        let width2 = thickness * (0.3 + 0.7 * t2) * 0.5;

        let c1 = mix(from_color, to_color, t1);
        let c2 = mix(from_color, to_color, t2);

        push_quad(
            &mut vertices,
            [p1 + perp * width1, p1 - perp * width1, p2 + perp * width2, p2 - perp * width2],
            [c1, c1, c2, c2],
        );
    }

    vertices
}

fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Thick polyline through `points`, optionally closing back to the first
pub fn polyline(points: &[Vec2], thickness: f32, color: [f32; 4], closed: bool) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(points.len() * 6);
    for pair in points.windows(2) {
        vertices.extend(line(pair[0], pair[1], thickness, color));
    }
    if closed && points.len() > 2 {
        vertices.extend(line(points[points.len() - 1], points[0], thickness, color));
    }
    vertices
}

/// Filled polygon as a fan from its first point.
///
/// Correct for any outline whose first point sees every edge (convex
/// shapes, arrowheads with the nose first).
pub fn fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let apex = points[0];
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(apex.x, apex.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    arc_band(center, inner_radius, outer_radius, 0.0, 2.0 * PI, color, segments)
}

/// Band between two radii sweeping from `theta_start` by `sweep` radians.
///
/// `sweep` may be negative (clockwise), which is how the angle arc shows
/// negative atan2 results.
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    theta_start: f32,
    sweep: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    if segments == 0 || sweep == 0.0 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let t1 = i as f32 / segments as f32;
        let t2 = (i + 1) as f32 / segments as f32;

        let theta1 = theta_start + t1 * sweep;
        let theta2 = theta_start + t2 * sweep;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        push_quad(
            &mut vertices,
            [
                center + dir1 * inner_radius,
                center + dir1 * outer_radius,
                center + dir2 * inner_radius,
                center + dir2 * outer_radius,
            ],
            [color; 4],
        );
    }

    vertices
}

/// Segments for an arc of `sweep` radians (at least 4)
pub fn arc_segments(sweep: f32, segments_per_radian: f32) -> u32 {
    ((sweep.abs() * segments_per_radian) as u32).max(4)
}

/// Solid dot inside a faded ring, used for lerp and polar points
pub fn marker(center: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = circle(center, radius * 0.55, color, 16);
    vertices.extend(ring(center, radius * 0.8, radius, with_alpha(color, 0.6), 20));
    vertices
}
