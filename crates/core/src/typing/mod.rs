use std::time::Duration;

use crate::config::TypingConfig;

/// One frame of the typing animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingStep {
    pub visible: String,
    /// Pause before the next step, `None` once the full text is shown.
    pub delay_after: Option<Duration>,
}

/// Reveals a text one character at a time, starting slow and then
/// accelerating. Iterating yields every prefix from the empty string up to
/// the full text.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    boundaries: Vec<usize>,
    next: usize,
    start_delay: Duration,
    slow_delay: Duration,
    fast_delay: Duration,
    slow_steps: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_config(&TypingConfig {
            text: text.into(),
            ..TypingConfig::default()
        })
    }

    pub fn from_config(config: &TypingConfig) -> Self {
        let text = config.text.clone();
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            next: 0,
            start_delay: Duration::from_millis(config.start_delay_ms),
            slow_delay: Duration::from_millis(config.slow_delay_ms),
            fast_delay: Duration::from_millis(config.fast_delay_ms),
            slow_steps: config.slow_steps,
        }
    }

    /// Pause before the first step is shown.
    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.boundaries.len()
    }

    /// Time from start until the full text is visible.
    pub fn total_duration(&self) -> Duration {
        let steps = self.boundaries.len();
        (0..steps.saturating_sub(1))
            .map(|step| self.delay_after(step))
            .fold(self.start_delay, |acc, d| acc + d)
    }

    fn delay_after(&self, step: usize) -> Duration {
        if step + 1 < self.slow_steps {
            self.slow_delay
        } else {
            self.fast_delay
        }
    }
}

impl Iterator for Typewriter {
    type Item = TypingStep;

    fn next(&mut self) -> Option<Self::Item> {
        let end = *self.boundaries.get(self.next)?;
        let step = self.next;
        self.next += 1;

        let delay_after = if self.is_finished() {
            None
        } else {
            Some(self.delay_after(step))
        };
        Some(TypingStep {
            visible: self.text[..end].to_string(),
            delay_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_every_prefix() {
        let visible: Vec<String> = Typewriter::new("Hello").map(|s| s.visible).collect();
        assert_eq!(visible, vec!["", "H", "He", "Hel", "Hell", "Hello"]);
    }

    #[test]
    fn accelerates_after_the_first_steps() {
        let delays: Vec<Option<Duration>> =
            Typewriter::new("Portfolio").map(|s| s.delay_after).collect();
        let slow = Some(Duration::from_millis(120));
        let fast = Some(Duration::from_millis(55));

        assert_eq!(delays.len(), 10);
        assert_eq!(&delays[..5], &[slow; 5]);
        assert_eq!(&delays[5..9], &[fast; 4]);
        assert_eq!(delays[9], None);
    }

    #[test]
    fn respects_character_boundaries() {
        let steps: Vec<String> = Typewriter::new("né✓").map(|s| s.visible).collect();
        assert_eq!(steps, vec!["", "n", "né", "né✓"]);
    }

    #[test]
    fn total_duration_includes_start_delay() {
        let typer = Typewriter::new("abc");
        assert_eq!(typer.start_delay(), Duration::from_millis(320));
        assert_eq!(typer.total_duration(), Duration::from_millis(320 + 3 * 120));
        assert_eq!(Typewriter::new("").total_duration(), Duration::from_millis(320));
    }

    #[test]
    fn stays_finished() {
        let mut typer = Typewriter::new("a");
        assert_eq!(typer.by_ref().count(), 2);
        assert!(typer.is_finished());
        assert_eq!(typer.next(), None);
    }
}
