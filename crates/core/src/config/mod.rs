use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    particle::{LifeRange, ParticleRanges, SpawnRange},
    render::GlowStyle,
    ParticleFieldError, Result,
};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub field: FieldConfig,
    pub frame: FrameConfig,
    pub typing: TypingConfig,
}

impl AppConfig {
    /// Reads and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(?path, "loading configuration");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        self.frame.validate()
    }
}

/// Tunables for the particle field. The defaults reproduce the portfolio
/// page's blue upward drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Surface width covered by each particle when sizing the field.
    pub width_per_particle: f32,
    /// Lower bound on the particle count for narrow surfaces.
    pub min_particles: usize,
    pub initial: ParticleRanges,
    pub respawn: ParticleRanges,
    /// Distance below the bottom edge at which respawned particles appear.
    pub respawn_depth: SpawnRange,
    pub bounds: Bounds,
    pub glow: GlowStyle,
}

impl Default for FieldConfig {
    fn default() -> Self {
        let initial = ParticleRanges {
            radius: SpawnRange::new(1.4, 4.2),
            vx: SpawnRange::new(-0.15, 0.15),
            vy: SpawnRange::new(-0.6, -0.12),
            alpha: SpawnRange::new(0.08, 0.35),
            life: LifeRange::new(120, 420),
        };
        Self {
            width_per_particle: 60.0,
            min_particles: 20,
            initial,
            respawn: ParticleRanges {
                alpha: SpawnRange::new(0.06, 0.32),
                ..initial
            },
            respawn_depth: SpawnRange::new(10.0, 80.0),
            bounds: Bounds::default(),
            glow: GlowStyle::default(),
        }
    }
}

impl FieldConfig {
    /// Number of particles allocated for a surface of the given width:
    /// `round(max(min_particles, width / width_per_particle))`.
    pub fn particle_count(&self, width: u32) -> usize {
        let scaled = width as f32 / self.width_per_particle;
        scaled.max(self.min_particles as f32).round() as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width_per_particle.is_finite() && self.width_per_particle > 0.0) {
            return Err(ParticleFieldError::invalid_config(
                "width_per_particle must be a positive number",
            ));
        }
        self.initial.validate("initial")?;
        self.respawn.validate("respawn")?;
        self.respawn_depth.validate("respawn_depth")?;
        self.bounds.validate()?;
        self.glow.validate()
    }
}

/// Margins outside the surface a particle may wander before it respawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub top_margin: f32,
    pub side_margin: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            top_margin: 10.0,
            side_margin: 20.0,
        }
    }
}

impl Bounds {
    fn validate(&self) -> Result<()> {
        let valid = |margin: f32| margin.is_finite() && margin >= 0.0;
        if !valid(self.top_margin) || !valid(self.side_margin) {
            return Err(ParticleFieldError::invalid_config(
                "bounds margins must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Cadence of the fixed-interval frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub interval_ms: u64,
    pub frame_limit: Option<u64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            interval_ms: 16,
            frame_limit: None,
        }
    }
}

impl FrameConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(ParticleFieldError::invalid_config(
                "frame interval must be at least one millisecond",
            ));
        }
        Ok(())
    }
}

/// Settings for the hero typing animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub text: String,
    pub start_delay_ms: u64,
    pub slow_delay_ms: u64,
    pub fast_delay_ms: u64,
    /// Steps typed at the slow pace before accelerating.
    pub slow_steps: usize,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            text: "Hello, I build things.".to_string(),
            start_delay_ms: 320,
            slow_delay_ms: 120,
            fast_delay_ms: 55,
            slow_steps: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_count_scales_with_width() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(600), 20);
        assert_eq!(config.particle_count(1800), 30);
        assert_eq!(config.particle_count(1830), 31);
        assert_eq!(config.particle_count(0), 20);
    }

    #[test]
    fn respawn_ranges_only_differ_in_alpha() {
        let config = FieldConfig::default();
        assert_eq!(config.respawn.alpha, SpawnRange::new(0.06, 0.32));
        assert_eq!(config.initial.alpha, SpawnRange::new(0.08, 0.35));
        assert_eq!(config.respawn.radius, config.initial.radius);
        assert_eq!(config.respawn.life, config.initial.life);
    }

    #[test]
    fn parses_partial_json_with_defaults() {
        let config = AppConfig::from_json_str(
            r#"{ "field": { "min_particles": 5 }, "frame": { "interval_ms": 33 } }"#,
        )
        .unwrap();

        assert_eq!(config.field.min_particles, 5);
        assert_eq!(config.field.width_per_particle, 60.0);
        assert_eq!(config.frame.interval(), Duration::from_millis(33));
        assert_eq!(config.typing.start_delay_ms, 320);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = AppConfig::from_json_str(
            r#"{ "field": { "respawn_depth": { "min": 80.0, "max": 10.0 } } }"#,
        )
        .unwrap_err();
        assert!(format!("{err}").contains("respawn_depth"));
    }

    #[test]
    fn rejects_zero_density() {
        let err = AppConfig::from_json_str(r#"{ "field": { "width_per_particle": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ParticleFieldError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_non_finite_or_negative_margins() {
        for bounds in [
            Bounds {
                top_margin: f32::NAN,
                ..Bounds::default()
            },
            Bounds {
                side_margin: f32::INFINITY,
                ..Bounds::default()
            },
            Bounds {
                side_margin: -1.0,
                ..Bounds::default()
            },
        ] {
            let config = FieldConfig {
                bounds,
                ..FieldConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ParticleFieldError::InvalidConfig(_))
            ));
        }
        assert!(FieldConfig::default().validate().is_ok());
    }

    #[test]
    fn surfaces_json_errors() {
        let err = AppConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ParticleFieldError::Json(_)));
    }
}
