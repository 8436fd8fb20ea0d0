use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::FieldConfig,
    particle::Particle,
    render::FieldRenderer,
    surface::{Surface, Viewport},
    Result,
};

/// Full-surface field of glowing particles drifting upward.
///
/// The field owns its surface and a fixed number of particles decided when
/// it is attached. Each [`tick`](Self::tick) advances every particle by one
/// frame, respawns the ones that expired or left the surface, and repaints
/// the surface. Particles are never added or removed afterwards.
pub struct ParticleField<S, R = StdRng> {
    surface: S,
    particles: Vec<Particle>,
    config: FieldConfig,
    renderer: FieldRenderer,
    rng: R,
    frame: u64,
}

impl<S: Surface> ParticleField<S, StdRng> {
    /// Attaches the field to `surface` using an entropy-seeded generator.
    ///
    /// Returns `Ok(None)` when there is no surface to draw on; the effect
    /// simply does not start in that case.
    pub fn attach(surface: Option<S>, config: FieldConfig) -> Result<Option<Self>> {
        Self::with_rng(surface, config, StdRng::from_entropy())
    }

    /// Same as [`attach`](Self::attach) with a reproducible particle sequence.
    pub fn with_seed(surface: Option<S>, config: FieldConfig, seed: u64) -> Result<Option<Self>> {
        Self::with_rng(surface, config, StdRng::seed_from_u64(seed))
    }
}

impl<S: Surface, R: Rng> ParticleField<S, R> {
    /// Attaches the field using the supplied random number generator.
    ///
    /// The configuration is validated first; a missing surface then yields
    /// `Ok(None)` exactly like [`ParticleField::attach`].
    pub fn with_rng(surface: Option<S>, config: FieldConfig, mut rng: R) -> Result<Option<Self>> {
        config.validate()?;

        let Some(surface) = surface else {
            tracing::debug!("no drawing surface available, particle field not started");
            return Ok(None);
        };

        let viewport = surface.viewport();
        let count = config.particle_count(viewport.width);
        let particles = (0..count)
            .map(|_| Particle::spawn(&mut rng, viewport, &config.initial))
            .collect();
        tracing::debug!(
            count,
            width = viewport.width,
            height = viewport.height,
            "particle field attached"
        );

        Ok(Some(Self {
            surface,
            particles,
            renderer: FieldRenderer::new(config.glow.clone()),
            config,
            rng,
            frame: 0,
        }))
    }

    /// Resizes the surface. Existing particles keep their coordinates; only
    /// later bounds checks and respawns see the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::trace!(
            width = viewport.width,
            height = viewport.height,
            "resizing particle surface"
        );
        self.surface.resize(viewport);
    }

    /// Advances every particle by one frame and returns how many respawned.
    pub fn update(&mut self) -> usize {
        let viewport = self.surface.viewport();
        let mut respawned = 0;
        for particle in &mut self.particles {
            particle.advance();
            if particle.needs_respawn(viewport, &self.config.bounds) {
                particle.respawn(
                    &mut self.rng,
                    viewport,
                    &self.config.respawn,
                    self.config.respawn_depth,
                );
                respawned += 1;
            }
        }
        respawned
    }

    /// Clears the surface and paints every particle at its current position.
    pub fn render(&mut self) {
        self.renderer.draw(&mut self.surface, &self.particles);
    }

    /// One render tick: update then repaint. Returns the respawn count.
    pub fn tick(&mut self) -> usize {
        let respawned = self.update();
        self.render();
        self.frame += 1;
        respawned
    }

    /// Read-only view of the particles, in allocation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Number of ticks performed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: Surface, R> std::fmt::Debug for ParticleField<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticleField")
            .field("viewport", &self.surface.viewport())
            .field("particles", &self.particles.len())
            .field("frame", &self.frame)
            .finish()
    }
}
