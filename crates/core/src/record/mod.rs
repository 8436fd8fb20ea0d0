use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    render::Rgb,
    surface::{PixelSurface, Surface},
    ParticleFieldError, Result,
};

/// Configuration options for the recording subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingSettings {
    pub output_dir: PathBuf,
    /// Capture one frame out of every `every_nth`.
    pub every_nth: u64,
    /// Page colour the transparent surface is composited onto.
    pub background: Rgb,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("frames"),
            every_nth: 1,
            background: Rgb::new(7, 11, 20),
        }
    }
}

/// Writes rendered surfaces to disk as PNG images.
#[derive(Debug)]
pub struct Recorder {
    settings: RecordingSettings,
    written: u64,
}

impl Recorder {
    /// Creates the output directory and validates the settings.
    pub fn new(settings: RecordingSettings) -> Result<Self> {
        if settings.every_nth == 0 {
            return Err(ParticleFieldError::invalid_config(
                "every_nth must be at least 1",
            ));
        }
        fs::create_dir_all(&settings.output_dir)?;
        Ok(Self {
            settings,
            written: 0,
        })
    }

    /// Writes `surface` if `frame` falls on the capture cadence and returns
    /// the path of the file written.
    pub fn capture(&mut self, frame: u64, surface: &PixelSurface) -> Result<Option<PathBuf>> {
        if frame % self.settings.every_nth != 0 {
            return Ok(None);
        }

        let path = self
            .settings
            .output_dir
            .join(format!("frame_{frame:05}.png"));
        write_png(&path, surface, self.settings.background)?;
        self.written += 1;
        tracing::trace!(?path, "captured frame");
        Ok(Some(path))
    }

    /// Number of frames saved so far.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    pub fn settings(&self) -> &RecordingSettings {
        &self.settings
    }
}

fn write_png(path: &Path, surface: &PixelSurface, background: Rgb) -> Result<()> {
    let viewport = surface.viewport();
    image::save_buffer_with_format(
        path,
        &surface.flatten_onto(background),
        viewport.width,
        viewport.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        render::GlowStyle,
        surface::{Surface, Viewport},
        Particle,
    };

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "particle-field-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn writes_png_frames_on_cadence() {
        let dir = temp_dir("cadence");
        let mut recorder = Recorder::new(RecordingSettings {
            output_dir: dir.clone(),
            every_nth: 2,
            background: Rgb::new(1, 2, 3),
        })
        .unwrap();
        let surface = PixelSurface::new(Viewport::new(4, 2));

        assert!(recorder.capture(0, &surface).unwrap().is_some());
        assert!(recorder.capture(1, &surface).unwrap().is_none());
        let path = recorder.capture(2, &surface).unwrap().unwrap();
        assert_eq!(recorder.frames_written(), 2);
        assert!(path.ends_with("frame_00002.png"));

        let frame = image::open(&path).unwrap().to_rgb8();
        assert_eq!(frame.dimensions(), (4, 2));
        assert!(frame.pixels().all(|px| px.0 == [1, 2, 3]));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn saved_frames_keep_painted_pixels() {
        let dir = temp_dir("painted");
        let mut recorder = Recorder::new(RecordingSettings {
            output_dir: dir.clone(),
            every_nth: 1,
            background: Rgb::new(0, 0, 0),
        })
        .unwrap();

        let style = GlowStyle::default();
        let glow = Particle {
            x: 4.5,
            y: 4.5,
            radius: 2.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 1.0,
            life: 100,
        };
        let mut surface = PixelSurface::new(Viewport::new(9, 9));
        surface.fill_glow(&style.disc_for(&glow));

        let path = recorder.capture(0, &surface).unwrap().unwrap();
        let frame = image::open(&path).unwrap().to_rgb8();
        assert_eq!(frame.get_pixel(4, 4).0, [63, 169, 245]);
        assert_eq!(frame.get_pixel(0, 0).0, [0, 0, 0]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_zero_cadence() {
        let err = Recorder::new(RecordingSettings {
            output_dir: temp_dir("zero"),
            every_nth: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ParticleFieldError::InvalidConfig(_)));
    }
}
