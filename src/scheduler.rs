//! Frame-driven play/pause control around a [`Universe`].

use tracing::debug;

use crate::engine::Universe;

/// Identifies one requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Playback {
    Running(FrameHandle),
    Paused,
}

/// Drives `tick` at most once per frame while running.
#[derive(Debug)]
pub struct Scheduler {
    playback: Playback,
    next_handle: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            playback: Playback::Paused,
            next_handle: 0,
        }
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_paused(&self) -> bool {
        self.playback == Playback::Paused
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle);
        self.next_handle += 1;
        self.playback = Playback::Running(handle);
        handle
    }

    /// Start running. Already running keeps the pending frame.
    pub fn play(&mut self) -> FrameHandle {
        match self.playback {
            Playback::Running(handle) => handle,
            Playback::Paused => {
                let handle = self.request_frame();
                debug!(frame = handle.0, "play");
                handle
            }
        }
    }

    /// Cancel the pending frame.
    pub fn pause(&mut self) {
        if let Playback::Running(handle) = self.playback {
            debug!(frame = handle.0, "pause");
        }
        self.playback = Playback::Paused;
    }

    pub fn toggle(&mut self) -> Playback {
        if self.is_paused() {
            self.play();
        } else {
            self.pause();
        }
        self.playback
    }

    /// Service one display frame: tick once and request the next frame if
    /// running, do nothing if paused. Returns whether a tick happened.
    pub fn frame(&mut self, universe: &mut Universe) -> bool {
        match self.playback {
            Playback::Paused => false,
            Playback::Running(_) => {
                universe.tick();
                self.request_frame();
                true
            }
        }
    }

    /// Pause and refill the universe randomly.
    pub fn reset(&mut self, universe: &mut Universe, seed: Option<u64>) {
        self.pause();
        universe.randomize_state(seed);
    }

    /// Pause and kill every cell.
    pub fn clear(&mut self, universe: &mut Universe) {
        self.pause();
        universe.clear();
    }
}
