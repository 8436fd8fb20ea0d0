use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{config::Bounds, surface::Viewport, ParticleFieldError, Result};

/// Half-open `[min, max)` range sampled uniformly. A degenerate range where
/// `min == max` always yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value == self.min || (value > self.min && value < self.max)
    }

    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ParticleFieldError::invalid_config(format!(
                "{name} range must satisfy min <= max (got {}..{})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Integer frame-count range used for particle lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeRange {
    pub min: i32,
    pub max: i32,
}

impl LifeRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min < 0 || self.min > self.max {
            return Err(ParticleFieldError::invalid_config(format!(
                "{name} range must satisfy 0 <= min <= max (got {}..{})",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Ranges used when randomising a particle. Positions are derived from the
/// viewport and are not part of the ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRanges {
    pub radius: SpawnRange,
    pub vx: SpawnRange,
    pub vy: SpawnRange,
    pub alpha: SpawnRange,
    pub life: LifeRange,
}

impl ParticleRanges {
    pub(crate) fn validate(&self, prefix: &str) -> Result<()> {
        self.radius.validate(&format!("{prefix}.radius"))?;
        self.vx.validate(&format!("{prefix}.vx"))?;
        self.vy.validate(&format!("{prefix}.vy"))?;
        self.alpha.validate(&format!("{prefix}.alpha"))?;
        self.life.validate(&format!("{prefix}.life"))
    }
}

/// A single glowing dot drifting across the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
    pub alpha: f32,
    /// Remaining frames before the particle respawns.
    pub life: i32,
}

impl Particle {
    /// Creates a particle placed uniformly across the visible surface.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, ranges: &ParticleRanges) -> Self {
        Self {
            x: SpawnRange::new(0.0, viewport.width as f32).sample(rng),
            y: SpawnRange::new(0.0, viewport.height as f32).sample(rng),
            radius: ranges.radius.sample(rng),
            vx: ranges.vx.sample(rng),
            vy: ranges.vy.sample(rng),
            alpha: ranges.alpha.sample(rng),
            life: ranges.life.sample(rng),
        }
    }

    /// Re-randomises the particle in place just below the bottom edge.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        ranges: &ParticleRanges,
        depth: SpawnRange,
    ) {
        self.x = SpawnRange::new(0.0, viewport.width as f32).sample(rng);
        self.y = viewport.height as f32 + depth.sample(rng);
        self.vx = ranges.vx.sample(rng);
        self.vy = ranges.vy.sample(rng);
        self.radius = ranges.radius.sample(rng);
        self.alpha = ranges.alpha.sample(rng);
        self.life = ranges.life.sample(rng);
    }

    /// Integrates one frame of motion and ages the particle by one frame.
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= 1;
    }

    /// Returns true when the particle has expired or drifted out of bounds.
    pub fn needs_respawn(&self, viewport: Viewport, bounds: &Bounds) -> bool {
        self.life < 0
            || self.y < -bounds.top_margin
            || self.x < -bounds.side_margin
            || self.x > viewport.width as f32 + bounds.side_margin
    }
}
