use serde::{Deserialize, Serialize};

use crate::{particle::Particle, surface::Surface, ParticleFieldError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colour stop of a radial gradient. `offset` is a fraction of the gradient
/// radius and `alpha_scale` multiplies the particle's own alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlowStop {
    pub offset: f32,
    pub alpha_scale: f32,
}

impl GlowStop {
    pub const fn new(offset: f32, alpha_scale: f32) -> Self {
        Self {
            offset,
            alpha_scale,
        }
    }
}

/// Look of every particle: a single hue fading out along a radial gradient
/// that spans `falloff` times the particle radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowStyle {
    pub color: Rgb,
    pub falloff: f32,
    pub stops: Vec<GlowStop>,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            color: Rgb::new(63, 169, 245),
            falloff: 8.0,
            stops: vec![
                GlowStop::new(0.0, 1.0),
                GlowStop::new(0.4, 0.45),
                GlowStop::new(1.0, 0.0),
            ],
        }
    }
}

impl GlowStyle {
    pub fn disc_for(&self, particle: &Particle) -> GlowDisc<'_> {
        GlowDisc {
            x: particle.x,
            y: particle.y,
            radius: particle.radius,
            gradient_radius: particle.radius * self.falloff,
            color: self.color,
            alpha: particle.alpha,
            stops: &self.stops,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.falloff.is_finite() && self.falloff > 0.0) {
            return Err(ParticleFieldError::invalid_config(
                "glow falloff must be a positive number",
            ));
        }
        if self.stops.is_empty() {
            return Err(ParticleFieldError::invalid_config(
                "glow needs at least one gradient stop",
            ));
        }
        let ordered = self
            .stops
            .windows(2)
            .all(|pair| pair[0].offset <= pair[1].offset);
        let in_range = self
            .stops
            .iter()
            .all(|stop| (0.0..=1.0).contains(&stop.offset));
        if !ordered || !in_range {
            return Err(ParticleFieldError::invalid_config(
                "glow stop offsets must be ascending within 0..=1",
            ));
        }
        Ok(())
    }
}

/// A filled disc painted with a radial gradient centred on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowDisc<'a> {
    pub x: f32,
    pub y: f32,
    /// Radius of the filled area.
    pub radius: f32,
    /// Radius at which the gradient reaches its last stop.
    pub gradient_radius: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub stops: &'a [GlowStop],
}

impl GlowDisc<'_> {
    /// Opacity painted at `distance` from the centre. Zero outside the disc.
    pub fn alpha_at(&self, distance: f32) -> f32 {
        if distance > self.radius || self.gradient_radius <= 0.0 {
            return 0.0;
        }
        self.alpha * gradient_scale(self.stops, distance / self.gradient_radius)
    }
}

fn gradient_scale(stops: &[GlowStop], t: f32) -> f32 {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    if t <= first.offset {
        return first.alpha_scale;
    }
    if t >= last.offset {
        return last.alpha_scale;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t >= a.offset && t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.alpha_scale;
            }
            let k = (t - a.offset) / span;
            return a.alpha_scale + (b.alpha_scale - a.alpha_scale) * k;
        }
    }
    last.alpha_scale
}

/// Paints a whole particle collection onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct FieldRenderer {
    style: GlowStyle,
}

impl FieldRenderer {
    pub fn new(style: GlowStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &GlowStyle {
        &self.style
    }

    /// Clears the surface and draws one glow disc per particle.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) {
        surface.clear();
        for particle in particles {
            surface.fill_glow(&self.style.disc_for(particle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(radius: f32, alpha: f32) -> Particle {
        Particle {
            x: 0.0,
            y: 0.0,
            radius,
            vx: 0.0,
            vy: 0.0,
            alpha,
            life: 100,
        }
    }

    #[test]
    fn gradient_spans_eight_radii() {
        let style = GlowStyle::default();
        let disc = style.disc_for(&particle(2.0, 0.3));
        assert_eq!(disc.gradient_radius, 16.0);
        assert_eq!(disc.color, Rgb::new(63, 169, 245));
    }

    #[test]
    fn interpolates_stops() {
        let stops = GlowStyle::default().stops;
        assert!((gradient_scale(&stops, 0.0) - 1.0).abs() < 1e-6);
        assert!((gradient_scale(&stops, 0.2) - 0.725).abs() < 1e-6);
        assert!((gradient_scale(&stops, 0.4) - 0.45).abs() < 1e-6);
        assert!((gradient_scale(&stops, 0.7) - 0.225).abs() < 1e-6);
        assert_eq!(gradient_scale(&stops, 1.5), 0.0);
    }

    #[test]
    fn alpha_is_zero_outside_fill_radius() {
        let style = GlowStyle::default();
        let disc = style.disc_for(&particle(4.0, 0.3));
        assert!((disc.alpha_at(0.0) - 0.3).abs() < 1e-6);
        assert!(disc.alpha_at(4.0) > 0.0);
        assert_eq!(disc.alpha_at(4.01), 0.0);
    }

    #[test]
    fn rejects_unordered_stops() {
        let style = GlowStyle {
            stops: vec![GlowStop::new(0.5, 1.0), GlowStop::new(0.1, 0.0)],
            ..GlowStyle::default()
        };
        assert!(style.validate().is_err());
        assert!(GlowStyle::default().validate().is_ok());
    }
}
