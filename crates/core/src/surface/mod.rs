use serde::{Deserialize, Serialize};

use crate::render::{GlowDisc, Rgb};

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// 2D rendering target the particle field paints into.
pub trait Surface {
    fn viewport(&self) -> Viewport;

    /// Changes the surface size. Like a canvas, resizing discards the
    /// current contents.
    fn resize(&mut self, viewport: Viewport);

    /// Resets every pixel to fully transparent.
    fn clear(&mut self);

    fn fill_glow(&mut self, disc: &GlowDisc<'_>);
}

/// CPU-side RGBA8 surface using straight alpha and source-over compositing.
#[derive(Clone)]
pub struct PixelSurface {
    viewport: Viewport,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            pixels: vec![0; viewport.pixel_count() * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Composites the surface over an opaque background and returns packed
    /// RGB bytes, row by row.
    pub fn flatten_onto(&self, background: Rgb) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.viewport.pixel_count() * 3);
        for px in self.pixels.chunks_exact(4) {
            let a = px[3] as f32 / 255.0;
            out.push(over(px[0], background.r, a));
            out.push(over(px[1], background.g, a));
            out.push(over(px[2], background.b, a));
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.viewport.width as usize + x as usize) * 4
    }

    fn blend(&mut self, index: usize, color: Rgb, alpha: f32) {
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = &mut self.pixels[index..index + 4];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= f32::EPSILON {
            dst.fill(0);
            return;
        }

        let mix = |src: u8, dst: u8| {
            let c = (src as f32 * sa + dst as f32 * da * (1.0 - sa)) / out_a;
            c.round().clamp(0.0, 255.0) as u8
        };
        dst[0] = mix(color.r, dst[0]);
        dst[1] = mix(color.g, dst[1]);
        dst[2] = mix(color.b, dst[2]);
        dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.pixels.clear();
        self.pixels.resize(viewport.pixel_count() * 4, 0);
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_glow(&mut self, disc: &GlowDisc<'_>) {
        let Viewport { width, height } = self.viewport;
        if width == 0 || height == 0 || disc.radius <= 0.0 {
            return;
        }

        // Saturating float-to-int casts clamp discs that lie off-surface.
        let min_x = (disc.x - disc.radius).floor().max(0.0) as u32;
        let max_x = ((disc.x + disc.radius).ceil() as u32).min(width);
        let min_y = (disc.y - disc.radius).floor().max(0.0) as u32;
        let max_y = ((disc.y + disc.radius).ceil() as u32).min(height);

        for py in min_y..max_y {
            for px in min_x..max_x {
                let dx = px as f32 + 0.5 - disc.x;
                let dy = py as f32 + 0.5 - disc.y;
                let alpha = disc.alpha_at((dx * dx + dy * dy).sqrt());
                if alpha > 0.0 {
                    let index = self.index(px, py);
                    self.blend(index, disc.color, alpha);
                }
            }
        }
    }
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("viewport", &self.viewport)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

fn over(src: u8, dst: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + dst as f32 * (1.0 - alpha))
        .round()
        .clamp(0.0, 255.0) as u8
}
