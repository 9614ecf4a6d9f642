//! Scene assembly: snapshot in, triangle list out
//!
//! Pure apart from the cosmetic RNG inside [`Effects`]; no GPU types here, so
//! the whole scene can be built and inspected in tests.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

use super::effects::{self, Effects, Particle};
use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::consts::OBSTACLE_WIDTH;
use crate::sim::{GamePhase, GameSnapshot, Obstacle};

/// Character art is drawn at roughly 2.4x the hitbox and scaled down
const BUNNY_SCALE: f32 = 0.42;
const CLOUD_COUNT: usize = 5;
const WAVE_LAYERS: usize = 3;
const WAVE_STEP: f32 = 5.0;
/// Depth of the cap overhanging each piling face
const CAP_HEIGHT: f32 = 20.0;
const CAP_OVERHANG: f32 = 5.0;

/// Build every vertex for one frame
pub fn build(snapshot: &GameSnapshot<'_>, fx: &mut Effects) -> Vec<Vertex> {
    let width = snapshot.config.playfield_width;
    let height = snapshot.config.playfield_height;
    let t = snapshot.elapsed_ms;

    let mut vertices = Vec::with_capacity(4096);
    background(&mut vertices, width, height, t);

    let gap = snapshot.config.gap_height;
    for obstacle in snapshot.obstacles {
        piling(&mut vertices, obstacle, gap, height, fx);
    }

    for particle in &fx.particles {
        bubble(&mut vertices, particle, fx.glitch_enabled);
    }

    match snapshot.phase {
        GamePhase::Start => {
            // Bobbing preview in place of the player
            let at = Vec2::new(width / 2.0, height / 2.0 - 30.0 + effects::bob_offset(t));
            bunny(&mut vertices, at, effects::preview_tilt(t), fx);
        }
        GamePhase::Playing => {
            let player = snapshot.player;
            bunny(&mut vertices, player.pos, player.rotation, fx);
        }
        GamePhase::Dead => {
            let player = snapshot.player;
            bunny(&mut vertices, player.pos, player.rotation, fx);
            vertices.extend(shapes::rect(0.0, 0.0, width, height, colors::DEAD_OVERLAY));
        }
    }

    glitch(&mut vertices, width, height, fx);
    vertices
}

fn background(out: &mut Vec<Vertex>, width: f32, height: f32, t: f64) {
    out.extend(shapes::vertical_gradient(
        0.0,
        0.0,
        width,
        height,
        &[
            (0.0, colors::SKY_TOP),
            (0.3, colors::SKY_ACCENT),
            (0.4, colors::SKY_MID),
            (0.7, colors::SKY_LOW),
            (1.0, colors::SKY_BOTTOM),
        ],
    ));

    let drift = effects::cloud_offset(t);
    for i in 0..CLOUD_COUNT {
        let fi = i as f32;
        let cx = (fi * 120.0 + drift).rem_euclid(width + 100.0) - 50.0;
        let cy = 40.0 + fi * 55.0 + (fi * 2.3).sin() * 20.0;
        out.extend(shapes::ellipse(
            Vec2::new(cx, cy),
            Vec2::new(50.0 + fi * 5.0, 15.0),
            0.0,
            colors::CLOUD,
            24,
        ));
        out.extend(shapes::ellipse(
            Vec2::new(cx + 25.0, cy - 5.0),
            Vec2::new(30.0, 12.0),
            0.0,
            colors::CLOUD,
            20,
        ));
    }

    let phase = effects::wave_phase(t);
    for layer in 0..WAVE_LAYERS {
        let fl = layer as f32;
        let amplitude = 6.0 - fl * 1.5;
        let points: Vec<Vec2> = wave_xs(width)
            .map(|x| {
                let y = height - 30.0 + fl * 12.0 + (x * 0.02 + phase + fl * 1.5).sin() * amplitude;
                Vec2::new(x, y)
            })
            .collect();
        let color = with_alpha(colors::WAVE, 0.5 + fl * 0.15);
        out.extend(shapes::area_under(&points, height, color));
    }

    for x in wave_xs(width) {
        let y = height - 30.0 + (x * 0.02 + phase).sin() * 6.0;
        out.extend(shapes::circle(Vec2::new(x, y), 2.0, colors::FOAM, 6));
    }
}

fn wave_xs(width: f32) -> impl Iterator<Item = f32> {
    let steps = (width / WAVE_STEP).ceil() as u32;
    (0..=steps).map(move |i| (i as f32 * WAVE_STEP).min(width))
}

/// One obstacle: two dock pilings with capped ends facing the gap
fn piling(out: &mut Vec<Vertex>, obstacle: &Obstacle, gap: f32, height: f32, fx: &mut Effects) {
    let x = obstacle.x;
    let top = obstacle.top_height;
    let bottom = obstacle.gap_bottom(gap);
    let stops = [
        (0.0, colors::PILING_EDGE),
        (0.3, colors::PILING_CENTER),
        (0.7, colors::PILING_CENTER),
        (1.0, colors::PILING_SHADE),
    ];

    out.extend(shapes::horizontal_gradient(x, 0.0, OBSTACLE_WIDTH, top, &stops));
    out.extend(shapes::horizontal_gradient(x, bottom, OBSTACLE_WIDTH, height - bottom, &stops));

    // Wood grain
    for i in 0..3 {
        let lx = x + 12.0 + i as f32 * 16.0;
        out.extend(shapes::line(
            Vec2::new(lx, 0.0),
            Vec2::new(lx, top - CAP_HEIGHT),
            1.0,
            colors::GRAIN,
        ));
        out.extend(shapes::line(
            Vec2::new(lx, bottom + CAP_HEIGHT),
            Vec2::new(lx, height),
            1.0,
            colors::GRAIN,
        ));
    }

    // Caps with a rope band
    let cap_w = OBSTACLE_WIDTH + CAP_OVERHANG * 2.0;
    out.extend(shapes::rect(x - CAP_OVERHANG, top - CAP_HEIGHT, cap_w, CAP_HEIGHT, colors::PILING_CAP));
    out.extend(shapes::rect(x - CAP_OVERHANG, bottom, cap_w, CAP_HEIGHT, colors::PILING_CAP));
    for rope_y in [top - 10.0, bottom + 10.0] {
        out.extend(shapes::line(
            Vec2::new(x - 3.0, rope_y),
            Vec2::new(x + OBSTACLE_WIDTH + 3.0, rope_y),
            3.0,
            colors::ROPE,
        ));
    }

    // Barnacles, occasionally drawn as square pixels
    for i in 0..3 {
        let center = Vec2::new(x + 10.0 + i as f32 * 18.0, top - 25.0);
        if fx.glitch_enabled && fx.rng.random_bool(0.1) {
            out.extend(shapes::rect(center.x, center.y, 3.0, 3.0, colors::BARNACLE));
        } else {
            out.extend(shapes::circle(center, 3.0, colors::BARNACLE, 8));
        }
    }
}

fn bubble(out: &mut Vec<Vertex>, p: &Particle, glitch_enabled: bool) {
    let life = p.life.max(0.0);
    let body = with_alpha(colors::BUBBLE, life * 0.6);
    if p.glitch && glitch_enabled {
        out.extend(shapes::rect(p.pos.x, p.pos.y, p.radius * 2.0, p.radius * 2.0, body));
    } else {
        out.extend(shapes::circle(p.pos, p.radius * life, body, 12));
    }
    let shine = with_alpha(colors::BUBBLE_SHINE, life * 0.3);
    out.extend(shapes::circle(
        p.pos - Vec2::splat(p.radius * 0.3),
        p.radius * 0.3 * life,
        shine,
        8,
    ));
}

/// The sailor bunny, centered on `at`
fn bunny(out: &mut Vec<Vertex>, at: Vec2, rotation: f32, fx: &mut Effects) {
    let mut art = bunny_art();
    if fx.glitch_enabled && fx.rng.random_bool(0.1) {
        let shift = fx.jitter(2.0);
        for v in &mut art {
            v.position[0] += shift.x;
            v.position[1] += shift.y;
        }
    }
    shapes::transform(&mut art, at, rotation, BUNNY_SCALE);
    out.extend(art);
}

/// Character art in unscaled local coordinates (origin at the face)
pub fn bunny_art() -> Vec<Vertex> {
    let v = Vec2::new;
    let mut art = Vec::with_capacity(1024);

    art.extend(shapes::ellipse(v(0.0, 50.0), v(28.0, 8.0), 0.0, colors::SHADOW, 16));

    // Sailor shirt and collar
    art.extend(shapes::rect(-30.0, 15.0, 60.0, 50.0, colors::NAVY));
    art.extend(shapes::triangle(v(-28.0, 18.0), v(0.0, 42.0), v(0.0, 34.0), colors::COLLAR));
    art.extend(shapes::triangle(v(-28.0, 18.0), v(0.0, 34.0), v(-20.0, 18.0), colors::COLLAR));
    art.extend(shapes::triangle(v(28.0, 18.0), v(0.0, 42.0), v(0.0, 34.0), colors::COLLAR));
    art.extend(shapes::triangle(v(28.0, 18.0), v(0.0, 34.0), v(20.0, 18.0), colors::COLLAR));
    art.extend(shapes::circle(v(0.0, 30.0), 4.0, colors::BUTTON, 10));

    // Head
    art.extend(shapes::ellipse(v(0.0, -8.0), v(32.0, 30.0), 0.0, colors::FUR, 32));

    // Ears
    for side in [-1.0_f32, 1.0] {
        let tilt = 0.15 * side;
        art.extend(shapes::ellipse(v(14.0 * side, -55.0), v(12.0, 28.0), tilt, colors::FUR, 20));
        art.extend(shapes::ellipse(v(14.0 * side, -52.0), v(6.0, 18.0), tilt, colors::INNER_EAR, 16));
    }

    // Sailor hat
    art.extend(shapes::ellipse(v(0.0, -35.0), v(28.0, 8.0), 0.0, colors::COLLAR, 20));
    art.extend(shapes::ellipse(v(0.0, -42.0), v(22.0, 12.0), 0.0, colors::COLLAR, 20));
    art.extend(shapes::rect(-22.0, -38.0, 44.0, 6.0, colors::NAVY));
    art.extend(shapes::triangle(v(0.0, -50.0), v(-6.0, -42.0), v(6.0, -42.0), colors::NAVY));

    // Eyes
    for side in [-1.0_f32, 1.0] {
        let cx = 12.0 * side;
        art.extend(shapes::ellipse(v(cx, -10.0), v(10.0, 11.0), 0.05 * side, colors::EYE_WHITE, 20));
        art.extend(shapes::ellipse(v(cx, -9.0), v(7.0, 8.0), 0.0, colors::IRIS, 16));
        art.extend(shapes::ellipse(v(cx, -8.0), v(4.5, 5.5), 0.0, colors::PUPIL, 12));
        art.extend(shapes::circle(v(cx - 2.0, -12.0), 2.5, colors::HIGHLIGHT, 8));
        art.extend(shapes::circle(v(cx + 2.0, -6.0), 1.2, colors::HIGHLIGHT, 6));
    }

    art.extend(shapes::ellipse(v(0.0, 0.0), v(3.0, 2.0), 0.0, colors::NOSE, 8));

    // Life ring with red stripes
    let ring_at = v(28.0, 30.0);
    art.extend(shapes::ring(ring_at, 12.0, 5.0, colors::COLLAR));
    art.extend(shapes::arc_band(ring_at, 12.0, 3.0, -0.5, 0.5, colors::RING_RED));
    art.extend(shapes::arc_band(ring_at, 12.0, 3.0, PI - 0.5, PI + 0.5, colors::RING_RED));

    art
}

/// Screen shake and scanlines while a glitch is active
fn glitch(out: &mut Vec<Vertex>, width: f32, height: f32, fx: &mut Effects) {
    let intensity = fx.glitch_intensity;
    if intensity <= 0.0 {
        return;
    }

    let shift = fx.jitter(2.0);
    for v in out.iter_mut() {
        v.position[0] += shift.x;
        v.position[1] += shift.y;
    }

    let mut y = 0.0;
    while y < height {
        if fx.rng.random_bool(intensity as f64) {
            out.extend(shapes::rect(0.0, y, width, 1.0, colors::SCANLINE));
        }
        y += 2.0;
    }
}
