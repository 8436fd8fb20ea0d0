//! Small page embellishments that sit around the particle field: the
//! preloader fade, the cursor glow, hero parallax and scroll reveals.
//!
//! Everything here is a pure function of the input events so hosts can wire
//! it to whatever event source they have.

use std::time::Duration;

/// Elements whose top edge is this far above the viewport bottom are revealed.
pub const REVEAL_MARGIN: f32 = 80.0;
/// Fraction of the scroll distance applied to the hero parallax layer.
pub const PARALLAX_FACTOR: f32 = 0.22;
const TIMELINE_STAGGER: Duration = Duration::from_millis(120);
const TIMELINE_HIDDEN_SHIFT: f32 = -16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloaderPhase {
    Visible,
    Fading,
    Hidden,
}

/// Timing of the loading overlay after the page finishes loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloaderSchedule {
    pub fade_after: Duration,
    pub hide_after_fade: Duration,
}

impl Default for PreloaderSchedule {
    fn default() -> Self {
        Self {
            fade_after: Duration::from_millis(900),
            hide_after_fade: Duration::from_millis(600),
        }
    }
}

impl PreloaderSchedule {
    pub fn phase_at(&self, since_load: Duration) -> PreloaderPhase {
        if since_load < self.fade_after {
            PreloaderPhase::Visible
        } else if since_load < self.fade_after + self.hide_after_fade {
            PreloaderPhase::Fading
        } else {
            PreloaderPhase::Hidden
        }
    }

    /// Target opacity; the fade itself is left to the host's transition.
    pub fn opacity_at(&self, since_load: Duration) -> f32 {
        match self.phase_at(since_load) {
            PreloaderPhase::Visible => 1.0,
            PreloaderPhase::Fading | PreloaderPhase::Hidden => 0.0,
        }
    }
}

/// Style of the glow that follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowState {
    pub left: f32,
    pub top: f32,
    pub size: f32,
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorGlow {
    state: GlowState,
}

impl Default for CursorGlow {
    fn default() -> Self {
        Self {
            state: GlowState {
                left: 0.0,
                top: 0.0,
                size: 160.0,
                opacity: 1.0,
                scale: 1.0,
            },
        }
    }
}

impl CursorGlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follows the pointer, enlarging over links, buttons and project cards.
    pub fn track(&mut self, x: f32, y: f32, over_interactive: bool) -> GlowState {
        self.state.left = x;
        self.state.top = y;
        if over_interactive {
            self.state.size = 260.0;
            self.state.opacity = 0.95;
        } else {
            self.state.size = 160.0;
            self.state.opacity = 1.0;
        }
        self.state
    }

    pub fn set_card_hover(&mut self, hovering: bool) -> GlowState {
        self.state.scale = if hovering { 1.3 } else { 1.0 };
        self.state
    }

    pub fn state(&self) -> GlowState {
        self.state
    }
}

pub fn parallax_offset(scroll_y: f32) -> f32 {
    scroll_y * PARALLAX_FACTOR
}

pub fn in_reveal_zone(top: f32, viewport_height: f32) -> bool {
    top < viewport_height - REVEAL_MARGIN
}

/// Fade-in sections. Once revealed an item stays revealed.
#[derive(Debug, Clone, Default)]
pub struct FadeInSet {
    revealed: Vec<bool>,
}

impl FadeInSet {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    /// Applies the current item tops and returns how many were newly revealed.
    ///
    /// `tops` lists every item in page order. The set grows to cover items
    /// added since the last update; items missing from `tops` keep their state.
    pub fn update(&mut self, tops: &[f32], viewport_height: f32) -> usize {
        if tops.len() > self.revealed.len() {
            self.revealed.resize(tops.len(), false);
        }
        let mut newly = 0;
        for (revealed, top) in self.revealed.iter_mut().zip(tops) {
            if !*revealed && in_reveal_zone(*top, viewport_height) {
                *revealed = true;
                newly += 1;
            }
        }
        newly
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineItemState {
    pub visible: bool,
    pub offset_x: f32,
    /// Transition delay, staggered by position in the timeline.
    pub delay: Duration,
}

/// Timeline entries toggle in both directions as the page scrolls.
pub fn timeline_states(tops: &[f32], viewport_height: f32) -> Vec<TimelineItemState> {
    tops.iter()
        .enumerate()
        .map(|(index, top)| {
            if in_reveal_zone(*top, viewport_height) {
                TimelineItemState {
                    visible: true,
                    offset_x: 0.0,
                    delay: TIMELINE_STAGGER * index as u32,
                }
            } else {
                TimelineItemState {
                    visible: false,
                    offset_x: TIMELINE_HIDDEN_SHIFT,
                    delay: Duration::ZERO,
                }
            }
        })
        .collect()
}
