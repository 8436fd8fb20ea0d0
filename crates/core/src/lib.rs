//! Core library for the portfolio particle field.
//!
//! The centrepiece is [`ParticleField`], a fixed-size set of glowing dots that
//! drift upward across a drawing surface and respawn below the bottom edge.
//! Around it sit the frame loop that drives it, a software [`PixelSurface`],
//! a PNG frame recorder, and the smaller page effects (typing animation,
//! cursor glow, scroll reveals, music player controls).

pub mod config;
pub mod effects;
pub mod error;
pub mod field;
pub mod particle;
pub mod player;
pub mod record;
pub mod render;
pub mod surface;
pub mod timeline;
pub mod typing;

pub use config::{AppConfig, Bounds, FieldConfig, FrameConfig, TypingConfig};
pub use effects::{CursorGlow, FadeInSet, PreloaderPhase, PreloaderSchedule};
pub use error::{ParticleFieldError, Result};
pub use field::ParticleField;
pub use particle::{LifeRange, Particle, ParticleRanges, SpawnRange};
pub use player::{format_time, AudioBackend, PlayerUi};
pub use record::{Recorder, RecordingSettings};
pub use render::{FieldRenderer, GlowDisc, GlowStop, GlowStyle, Rgb};
pub use surface::{PixelSurface, Surface, Viewport};
pub use timeline::{FrameClock, FrameLoop, StopHandle};
pub use typing::{TypingStep, Typewriter};
