use crate::Result;

pub const PLAY_LABEL: &str = "▶";
pub const PAUSE_LABEL: &str = "⏸";
pub const MUTED_LABEL: &str = "🔈";
pub const UNMUTED_LABEL: &str = "🔊";

/// Formats seconds as `m:ss`. Missing, zero, or non-finite values read `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback device behind the player controls.
pub trait AudioBackend {
    /// Whether the device is currently paused. Play toggles follow this
    /// rather than the button state.
    fn is_paused(&self) -> bool;
    /// Starts playback. Hosts may refuse, for instance when autoplay is blocked.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn seek(&mut self, seconds: f64);
}

/// State of the background music widget: play button, mute button, progress
/// slider, and the two time readouts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerUi {
    /// Button state; it can disagree with the backend after a refused play.
    shows_play: bool,
    muted: bool,
    duration: Option<f64>,
    current: f64,
}

impl Default for PlayerUi {
    fn default() -> Self {
        Self {
            shows_play: true,
            muted: false,
            duration: None,
            current: 0.0,
        }
    }
}

impl PlayerUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Records the track length once metadata is available.
    pub fn on_metadata(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    pub fn on_time_update(&mut self, current: f64) {
        if self.duration.is_some() {
            self.current = current.max(0.0);
        }
    }

    /// Slider position in percent; zero until the duration is known.
    pub fn progress(&self) -> f64 {
        match self.duration {
            Some(duration) => (self.current / duration * 100.0).clamp(0.0, 100.0),
            None => 0.0,
        }
    }

    pub fn current_label(&self) -> String {
        format_time(self.current)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration.unwrap_or(0.0))
    }

    pub fn play_label(&self) -> &'static str {
        if self.shows_play {
            PLAY_LABEL
        } else {
            PAUSE_LABEL
        }
    }

    pub fn mute_label(&self) -> &'static str {
        if self.muted {
            MUTED_LABEL
        } else {
            UNMUTED_LABEL
        }
    }

    /// Toggles playback based on the backend's paused state. A refused
    /// `play` is logged and otherwise ignored; the button still shows its
    /// pause label and the next toggle asks the backend to play again.
    pub fn toggle_play<B: AudioBackend + ?Sized>(&mut self, backend: &mut B) {
        if backend.is_paused() {
            if let Err(err) = backend.play() {
                tracing::debug!(%err, "playback request was refused");
            }
            self.shows_play = false;
        } else {
            backend.pause();
            self.shows_play = true;
        }
    }

    /// Moves playback to `percent` of the track. Ignored until the duration
    /// is known.
    pub fn seek_percent<B: AudioBackend + ?Sized>(&mut self, backend: &mut B, percent: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        let target = percent.clamp(0.0, 100.0) / 100.0 * duration;
        backend.seek(target);
        self.current = target;
    }

    pub fn toggle_mute<B: AudioBackend + ?Sized>(&mut self, backend: &mut B) {
        self.muted = !self.muted;
        backend.set_muted(self.muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParticleFieldError;

    #[derive(Debug, Default)]
    struct FakeBackend {
        refuse_play: bool,
        playing: bool,
        play_calls: usize,
        pause_calls: usize,
        muted: bool,
        position: f64,
    }

    impl AudioBackend for FakeBackend {
        fn is_paused(&self) -> bool {
            !self.playing
        }

        fn play(&mut self) -> Result<()> {
            self.play_calls += 1;
            if self.refuse_play {
                return Err(ParticleFieldError::msg("autoplay blocked"));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.pause_calls += 1;
            self.playing = false;
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn seek(&mut self, seconds: f64) {
            self.position = seconds;
        }
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(754.2), "12:34");
    }

    #[test]
    fn toggles_playback_and_labels() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend::default();
        assert_eq!(ui.play_label(), PLAY_LABEL);

        ui.toggle_play(&mut backend);
        assert!(backend.playing);
        assert_eq!(ui.play_label(), PAUSE_LABEL);

        ui.toggle_play(&mut backend);
        assert!(!backend.playing);
        assert_eq!(ui.play_label(), PLAY_LABEL);
        assert_eq!((backend.play_calls, backend.pause_calls), (1, 1));
    }

    #[test]
    fn refused_play_is_ignored() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend {
            refuse_play: true,
            ..Default::default()
        };

        ui.toggle_play(&mut backend);
        assert!(!backend.playing);
        assert_eq!(ui.play_label(), PAUSE_LABEL);
    }

    #[test]
    fn toggling_after_a_refused_play_retries_playback() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend {
            refuse_play: true,
            ..Default::default()
        };

        ui.toggle_play(&mut backend);
        ui.toggle_play(&mut backend);

        assert_eq!(
            (backend.play_calls, backend.pause_calls, ui.play_label()),
            (2, 0, PAUSE_LABEL)
        );
    }

    #[test]
    fn toggle_pauses_a_backend_that_is_already_playing() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend {
            playing: true,
            ..Default::default()
        };

        ui.toggle_play(&mut backend);
        assert!(!backend.playing);
        assert_eq!((backend.play_calls, backend.pause_calls), (0, 1));
        assert_eq!(ui.play_label(), PLAY_LABEL);
    }

    #[test]
    fn tracks_progress_once_duration_is_known() {
        let mut ui = PlayerUi::new();
        ui.on_time_update(30.0);
        assert_eq!(ui.progress(), 0.0);
        assert_eq!(ui.duration_label(), "0:00");

        ui.on_metadata(120.0);
        ui.on_time_update(30.0);
        assert_eq!(ui.progress(), 25.0);
        assert_eq!(ui.current_label(), "0:30");
        assert_eq!(ui.duration_label(), "2:00");
    }

    #[test]
    fn seeking_requires_duration() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend::default();

        ui.seek_percent(&mut backend, 50.0);
        assert_eq!(backend.position, 0.0);

        ui.on_metadata(200.0);
        ui.seek_percent(&mut backend, 50.0);
        assert_eq!(backend.position, 100.0);
        assert_eq!(ui.progress(), 50.0);
    }

    #[test]
    fn toggles_mute() {
        let mut ui = PlayerUi::new();
        let mut backend = FakeBackend::default();
        assert_eq!(ui.mute_label(), UNMUTED_LABEL);

        ui.toggle_mute(&mut backend);
        assert!(backend.muted);
        assert_eq!(ui.mute_label(), MUTED_LABEL);
    }
}
