//! Ambient dot-grid background.
//!
//! A regular grid of dots covers the surface, each fading toward the edges
//! and the center and pulsing in brightness on its own phase. Points are kept
//! in a flat arena and mutated in place each frame; the set is rebuilt
//! wholesale when the surface is resized.

use std::f32::consts::TAU;

use rand::prelude::*;

use crate::color::Rgb;
use crate::surface::Surface;

/// Width of the edge fade zone as a fraction of each dimension.
const EDGE_FADE_FRACTION: f32 = 0.15;
/// Radial center fade: opacity floor at the exact center.
const CENTER_FADE_FLOOR: f32 = 0.1;
/// Radial center fade: additional opacity gained toward the corners.
const CENTER_FADE_RANGE: f32 = 0.3;
/// Hard ceiling on any point's base opacity.
const OPACITY_CEILING: f32 = 0.8;
/// Hard floor so no point becomes fully invisible.
const OPACITY_FLOOR: f32 = 0.02;
/// How strongly the glow color bleeds into a pulsing dot.
const GLOW_INFLUENCE: f32 = 0.35;
/// Baseline share of a dot's alpha that does not pulse.
const ALPHA_FLOOR: f32 = 0.7;
/// Intensity above which a soft halo is painted behind the dot.
const GLOW_THRESHOLD: f32 = 0.8;
/// Per-frame angular speed range, radians.
const SPEED_RANGE: std::ops::Range<f32> = 0.015..0.045;

#[derive(Debug, Clone)]
pub struct DotGridConfig {
    pub dot_color: Rgb,
    pub glow_color: Rgb,
    pub dot_radius: f32,
    pub spacing: u32,
}

impl Default for DotGridConfig {
    fn default() -> Self {
        Self {
            dot_color: crate::color::FALLBACK_DOT,
            glow_color: crate::color::FALLBACK_GLOW,
            dot_radius: 1.5,
            spacing: 28,
        }
    }
}

/// One rendered dot. Identity is fixed at construction; only `phase` moves.
#[derive(Debug, Clone)]
pub struct DotPoint {
    pub x: f32,
    pub y: f32,
    pub base_opacity: f32,
    phase: f32,
    speed: f32,
}

pub struct DotGrid {
    config: DotGridConfig,
    seed: u64,
    points: Vec<DotPoint>,
}

impl DotGrid {
    pub fn new(config: DotGridConfig, width: u32, height: u32, seed: u64) -> Self {
        let points = build_points(&config, width, height, seed);
        Self {
            config,
            seed,
            points,
        }
    }

    /// Replaces the point set wholesale for the new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.points = build_points(&self.config, width, height, self.seed);
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[DotPoint] {
        &self.points
    }

    /// Advances every point's phase and repaints the whole field.
    pub fn advance_and_paint(&mut self, surface: &mut Surface) {
        let dot = self.config.dot_color;
        let glow = self.config.glow_color;
        let radius = self.config.dot_radius;
        for point in &mut self.points {
            point.phase = (point.phase + point.speed) % TAU;
            let intensity = (point.phase.sin() + 1.0) * 0.5;
            let mix = intensity * GLOW_INFLUENCE;
            let color = dot.lerp(glow, mix);
            let alpha = point.base_opacity * (ALPHA_FLOOR + (1.0 - ALPHA_FLOOR) * mix);
            if intensity > GLOW_THRESHOLD {
                surface.fill_circle(point.x, point.y, radius * 2.5, glow, alpha * 0.25);
            }
            surface.fill_circle(point.x, point.y, radius, color, alpha);
        }
    }
}

/// Lays out the grid at cell centers and computes each point's static fade.
fn build_points(config: &DotGridConfig, width: u32, height: u32, seed: u64) -> Vec<DotPoint> {
    if width == 0 || height == 0 || config.spacing == 0 {
        return Vec::new();
    }
    let spacing = config.spacing;
    let cols = width.div_ceil(spacing);
    let rows = height.div_ceil(spacing);
    let (w, h) = (width as f32, height as f32);
    let (cx, cy) = (w * 0.5, h * 0.5);
    let corner_distance = (cx * cx + cy * cy).sqrt();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let x = (col * spacing) as f32 + spacing as f32 * 0.5;
            let y = (row * spacing) as f32 + spacing as f32 * 0.5;
            let base_opacity = (edge_fade(x, y, w, h) * center_fade(x, y, cx, cy, corner_distance))
                .clamp(OPACITY_FLOOR, OPACITY_CEILING);
            points.push(DotPoint {
                x,
                y,
                base_opacity,
                phase: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(SPEED_RANGE),
            });
        }
    }
    points
}

/// Multiplicative fade against all four edges, each factor capped at 1.0.
fn edge_fade(x: f32, y: f32, width: f32, height: f32) -> f32 {
    let zone_x = width * EDGE_FADE_FRACTION;
    let zone_y = height * EDGE_FADE_FRACTION;
    let factor = |distance: f32, zone: f32| (distance / zone).clamp(0.0, 1.0);
    factor(x, zone_x) * factor(width - x, zone_x) * factor(y, zone_y) * factor(height - y, zone_y)
}

/// Radial fade that dims the center and brightens toward the corners.
fn center_fade(x: f32, y: f32, cx: f32, cy: f32, corner_distance: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    let distance = (dx * dx + dy * dy).sqrt();
    CENTER_FADE_FLOOR + CENTER_FADE_RANGE * (distance / corner_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: u32, height: u32, spacing: u32) -> DotGrid {
        let config = DotGridConfig {
            spacing,
            ..DotGridConfig::default()
        };
        DotGrid::new(config, width, height, 7)
    }

    #[test]
    fn point_count_matches_grid_formula() {
        // ceil(w / spacing) * ceil(h / spacing)
        assert_eq!(grid(100, 100, 10).point_count(), 100);
        assert_eq!(grid(101, 100, 10).point_count(), 110);
        assert_eq!(grid(1, 1, 10).point_count(), 1);
        assert_eq!(grid(1280, 720, 28).point_count(), 46 * 26);
    }

    #[test]
    fn base_opacity_stays_in_bounds() {
        let grid = grid(320, 200, 16);
        for point in grid.points() {
            assert!(
                point.base_opacity >= OPACITY_FLOOR && point.base_opacity <= OPACITY_CEILING,
                "opacity {} out of range at ({}, {})",
                point.base_opacity,
                point.x,
                point.y
            );
        }
    }

    #[test]
    fn zero_dimensions_render_nothing() {
        let mut empty = grid(0, 100, 10);
        assert_eq!(empty.point_count(), 0);
        let mut surface = Surface::new(64, 64);
        empty.advance_and_paint(&mut surface);
        assert!(surface.pixels().iter().all(|&p| p == 0));

        assert_eq!(grid(100, 0, 10).point_count(), 0);
        assert_eq!(grid(100, 100, 0).point_count(), 0);
    }

    #[test]
    fn painting_touches_the_surface() {
        let mut grid = grid(64, 64, 16);
        let mut surface = Surface::new(64, 64);
        grid.advance_and_paint(&mut surface);
        assert!(surface.pixels().iter().any(|&p| p != 0));
    }

    #[test]
    fn resize_rebuilds_the_point_set() {
        let mut grid = grid(100, 100, 10);
        assert_eq!(grid.point_count(), 100);
        grid.resize(50, 50);
        assert_eq!(grid.point_count(), 25);
        grid.resize(0, 50);
        assert_eq!(grid.point_count(), 0);
    }

    #[test]
    fn same_seed_reproduces_phases() {
        let a = grid(64, 64, 16);
        let b = grid(64, 64, 16);
        for (pa, pb) in a.points().iter().zip(b.points()) {
            assert_eq!(pa.phase, pb.phase);
            assert_eq!(pa.speed, pb.speed);
        }
    }
}
