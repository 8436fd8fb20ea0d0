use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crate::{config::FrameConfig, Result};

/// Frame counter and elapsed wall time of a running loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    started: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
        }
    }

    pub fn advance(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average frames per second since the clock started.
    pub fn fps(&self) -> f32 {
        let secs = self.elapsed().as_secs_f32();
        if secs <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / secs
        }
    }
}

/// Cancels a [`FrameLoop`] from any thread. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Fixed-interval render tick driver. It runs on the calling thread until the
/// frame limit is reached, the [`StopHandle`] fires, or a frame fails.
#[derive(Debug)]
pub struct FrameLoop {
    interval: Duration,
    frame_limit: Option<u64>,
    stop: StopHandle,
}

impl FrameLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            frame_limit: None,
            stop: StopHandle::default(),
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        let mut frame_loop = Self::new(config.interval());
        frame_loop.frame_limit = config.frame_limit;
        frame_loop
    }

    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Calls `on_frame` once per interval with the zero-based frame index and
    /// returns the number of frames that ran.
    pub fn run<F>(&self, mut on_frame: F) -> Result<u64>
    where
        F: FnMut(u64) -> Result<()>,
    {
        let mut clock = FrameClock::start();
        let mut next_deadline = Instant::now();

        while !self.stop.is_stopped() {
            if self.frame_limit.is_some_and(|limit| clock.frames() >= limit) {
                break;
            }

            on_frame(clock.frames())?;
            clock.advance();

            next_deadline += self.interval;
            let now = Instant::now();
            if next_deadline > now {
                thread::sleep(next_deadline - now);
            } else {
                // Running behind: drop the backlog instead of bursting frames.
                next_deadline = now;
            }
        }

        tracing::debug!(
            frames = clock.frames(),
            fps = clock.fps(),
            "frame loop finished"
        );
        Ok(clock.frames())
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::from_config(&FrameConfig::default())
    }
}
