//! Pointer-reactive pixelation over the hero card.
//!
//! The caller supplies the card's text as a [`TextLayout`]; the effect
//! rasterises it once into an offscreen source buffer and then, while the
//! pointer is inside the card, resamples that buffer in blocks each frame.
//! Blocks near the pointer are painted larger and sharper; blocks outside
//! the focus radius are left untouched. Averaging cost grows with region
//! area times block count, which is acceptable only at hero-card scale.

use crate::color::Rgb;
use crate::surface::Surface;
use crate::text::{self, TextLayout};

#[derive(Debug, Clone)]
pub struct PixelateConfig {
    /// Sampling step in pixels.
    pub block_size: u32,
    /// Focus radius around the pointer, in pixels.
    pub radius: f32,
    /// Smallest drawn block once distance scaling is applied.
    pub min_block: u32,
}

impl Default for PixelateConfig {
    fn default() -> Self {
        Self {
            block_size: 8,
            radius: 110.0,
            min_block: 2,
        }
    }
}

pub struct Pixelate {
    config: PixelateConfig,
    source: Surface,
    source_alpha: Vec<f32>,
    output: Surface,
    coverage: Vec<f32>,
    pointer: Option<(f32, f32)>,
}

impl Pixelate {
    pub fn new(config: PixelateConfig, width: usize, height: usize) -> Self {
        Self {
            config,
            source: Surface::new(width, height),
            source_alpha: vec![0.0; width * height],
            output: Surface::new(width, height),
            coverage: vec![0.0; width * height],
            pointer: None,
        }
    }

    pub fn width(&self) -> usize {
        self.source.width()
    }

    pub fn height(&self) -> usize {
        self.source.height()
    }

    /// Resizes both buffers to the region's current size. The caller is
    /// expected to re-apply its layout afterwards.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.source.resize(width, height);
        self.output.resize(width, height);
        self.source_alpha = vec![0.0; width * height];
        self.coverage = vec![0.0; width * height];
    }

    /// Re-renders the caller-supplied text layout into the source buffer.
    /// Spans with opacity below 1.0 land as dimmed background layers.
    pub fn set_layout(&mut self, layout: &TextLayout) {
        self.source.clear(Rgb::new(0, 0, 0));
        self.source_alpha.fill(0.0);
        let width = self.source.width();
        for span in &layout.spans {
            let x = span.resolve_x(width as u32);
            text::for_each_pixel(&span.text, span.scale, |px, py| {
                let tx = x + px as i32;
                let ty = span.y + py as i32;
                self.source.put(tx, ty, span.color);
                if tx >= 0 && ty >= 0 {
                    let (tx, ty) = (tx as usize, ty as usize);
                    if tx < width && ty < self.source.height() {
                        let idx = ty * width + tx;
                        self.source_alpha[idx] = self.source_alpha[idx].max(span.opacity);
                    }
                }
            });
        }
    }

    /// Region-local pointer sample; `None` means the pointer left the region.
    /// Leaving stops the animation and clears the output immediately.
    pub fn update_pointer(&mut self, pointer: Option<(f32, f32)>) {
        if pointer.is_none() && self.pointer.is_some() {
            self.clear_output();
        }
        self.pointer = pointer;
    }

    pub fn is_active(&self) -> bool {
        self.pointer.is_some()
    }

    /// Rebuilds the pixelated output for the current pointer position.
    pub fn frame(&mut self) {
        let Some((px, py)) = self.pointer else {
            return;
        };
        self.clear_output();
        let block = self.config.block_size.max(1);
        let radius = self.config.radius;
        let width = self.source.width();
        let height = self.source.height();

        let mut by = 0usize;
        while by < height {
            let mut bx = 0usize;
            while bx < width {
                let cx = bx as f32 + block as f32 * 0.5;
                let cy = by as f32 + block as f32 * 0.5;
                let distance = ((cx - px).powi(2) + (cy - py).powi(2)).sqrt();
                if distance <= radius {
                    self.paint_block(bx, by, cx, cy, distance);
                }
                bx += block as usize;
            }
            by += block as usize;
        }
    }

    /// Blends the pixelated output over `target` at the region's offset.
    pub fn composite(&self, target: &mut Surface, ox: i32, oy: i32) {
        let width = self.output.width();
        for (idx, &alpha) in self.coverage.iter().enumerate() {
            if alpha <= 0.0 {
                continue;
            }
            let x = (idx % width) as i32;
            let y = (idx / width) as i32;
            target.blend(ox + x, oy + y, self.output.get(x, y), alpha);
        }
    }

    fn clear_output(&mut self) {
        self.output.clear(Rgb::new(0, 0, 0));
        self.coverage.fill(0.0);
    }

    /// Averages the source pixels under one block and paints it, scaled by
    /// distance from the pointer.
    fn paint_block(&mut self, bx: usize, by: usize, cx: f32, cy: f32, distance: f32) {
        let block = self.config.block_size.max(1) as usize;
        let width = self.source.width();
        let height = self.source.height();

        let mut sum = [0.0f32; 3];
        let mut weight = 0.0f32;
        for y in by..(by + block).min(height) {
            for x in bx..(bx + block).min(width) {
                let alpha = self.source_alpha[y * width + x];
                if alpha <= 0.0 {
                    continue;
                }
                let color = self.source.get(x as i32, y as i32);
                sum[0] += f32::from(color.r) * alpha;
                sum[1] += f32::from(color.g) * alpha;
                sum[2] += f32::from(color.b) * alpha;
                weight += alpha;
            }
        }
        if weight <= 0.0 {
            return;
        }

        let average = Rgb::new(
            (sum[0] / weight).round().clamp(0.0, 255.0) as u8,
            (sum[1] / weight).round().clamp(0.0, 255.0) as u8,
            (sum[2] / weight).round().clamp(0.0, 255.0) as u8,
        );
        let block_alpha = (weight / (block * block) as f32).min(1.0);
        let drawn = scaled_block(
            self.config.block_size,
            self.config.min_block,
            distance,
            self.config.radius,
        );

        let half = drawn as f32 * 0.5;
        let x0 = (cx - half).round() as i32;
        let y0 = (cy - half).round() as i32;
        for y in y0..y0 + drawn as i32 {
            for x in x0..x0 + drawn as i32 {
                if x < 0 || y < 0 {
                    continue;
                }
                let (ux, uy) = (x as usize, y as usize);
                if ux >= width || uy >= height {
                    continue;
                }
                self.output.put(x, y, average);
                let idx = uy * width + ux;
                self.coverage[idx] = self.coverage[idx].max(block_alpha);
            }
        }
    }
}

/// Drawn block size shrinks with distance from the pointer, clamped to the
/// configured minimum.
fn scaled_block(block_size: u32, min_block: u32, distance: f32, radius: f32) -> u32 {
    if radius <= 0.0 {
        return min_block.max(1);
    }
    let falloff = (1.0 - distance / radius).clamp(0.0, 1.0);
    ((block_size as f32 * falloff).round() as u32).max(min_block.max(1))
}
