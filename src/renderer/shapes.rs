//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in playfield coordinates
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    // corners: top-left, top-right, bottom-right, bottom-left
    let [a, b, c, d] = corners;
    vertices.push(Vertex::new(a.x, a.y, colors[0]));
    vertices.push(Vertex::new(b.x, b.y, colors[1]));
    vertices.push(Vertex::new(c.x, c.y, colors[2]));

    vertices.push(Vertex::new(a.x, a.y, colors[0]));
    vertices.push(Vertex::new(c.x, c.y, colors[2]));
    vertices.push(Vertex::new(d.x, d.y, colors[3]));
}

/// Axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        [color; 4],
    );
    vertices
}

/// Rectangle with a top-to-bottom gradient. `stops` are (offset 0..1, color), sorted.
pub fn vertical_gradient(x: f32, y: f32, w: f32, h: f32, stops: &[(f32, [f32; 4])]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let y0 = y + h * t0;
        let y1 = y + h * t1;
        quad(
            &mut vertices,
            [
                Vec2::new(x, y0),
                Vec2::new(x + w, y0),
                Vec2::new(x + w, y1),
                Vec2::new(x, y1),
            ],
            [c0, c0, c1, c1],
        );
    }
    vertices
}

/// Rectangle with a left-to-right gradient
pub fn horizontal_gradient(
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    stops: &[(f32, [f32; 4])],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let x0 = x + w * t0;
        let x1 = x + w * t1;
        quad(
            &mut vertices,
            [
                Vec2::new(x0, y),
                Vec2::new(x1, y),
                Vec2::new(x1, y + h),
                Vec2::new(x0, y + h),
            ],
            [c0, c1, c1, c0],
        );
    }
    vertices
}

/// Thick straight line
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [from + perp, to + perp, to - perp, from - perp],
        [color; 4],
    );
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), 0.0, color, segments)
}

/// Filled ellipse with radii `radii`, rotated by `rotation` radians
pub fn ellipse(
    center: Vec2,
    radii: Vec2,
    rotation: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let rot = Vec2::from_angle(rotation);
    let point = |theta: f32| center + rot.rotate(Vec2::new(radii.x * theta.cos(), radii.y * theta.sin()));

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let p1 = point(theta1);
        let p2 = point(theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Thick circular band from `theta_start` to `theta_end`
pub fn arc_band(
    center: Vec2,
    radius: f32,
    thickness: f32,
    theta_start: f32,
    theta_end: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let span = theta_end - theta_start;
    let num_segments = ((span.abs() / PI * 16.0) as u32).max(4);
    let inner_r = radius - thickness / 2.0;
    let outer_r = radius + thickness / 2.0;

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let theta1 = theta_start + span * (i as f32 / num_segments as f32);
        let theta2 = theta_start + span * ((i + 1) as f32 / num_segments as f32);

        let dir1 = Vec2::from_angle(theta1);
        let dir2 = Vec2::from_angle(theta2);

        quad(
            &mut vertices,
            [
                center + dir1 * inner_r,
                center + dir1 * outer_r,
                center + dir2 * outer_r,
                center + dir2 * inner_r,
            ],
            [color; 4],
        );
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, radius: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    arc_band(center, radius, thickness, 0.0, TAU, color)
}

/// Fill the area between a sampled curve and a horizontal baseline below it
pub fn area_under(points: &[Vec2], baseline: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len().saturating_sub(1) * 6);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        quad(
            &mut vertices,
            [a, b, Vec2::new(b.x, baseline), Vec2::new(a.x, baseline)],
            [color; 4],
        );
    }
    vertices
}

/// Scale, rotate, then translate vertices in place
pub fn transform(vertices: &mut [Vertex], translation: Vec2, rotation: f32, scale: f32) {
    let rot = Vec2::from_angle(rotation);
    for v in vertices {
        let p = rot.rotate(Vec2::from(v.position) * scale) + translation;
        v.position = p.to_array();
    }
}
