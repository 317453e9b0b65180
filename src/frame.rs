//! Cancellable frame scheduling.
//!
//! A frame loop runs one step at a time; the next frame is only requested
//! once the current step has returned, so frames never overlap. Cancelling
//! the token stops the loop before its next step.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What a frame step wants next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Frame counter bound to a cancellation token
#[derive(Debug)]
pub struct FrameLoop {
    token: CancellationToken,
    frames: u64,
}

impl FrameLoop {
    pub fn new(token: CancellationToken) -> Self {
        Self { token, frames: 0 }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame unless cancelled.
    ///
    /// Returns whether the host should request another frame.
    pub fn tick(&mut self, step: impl FnOnce(u64) -> FrameControl) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        let control = step(self.frames);
        self.frames += 1;
        control == FrameControl::Continue && !self.token.is_cancelled()
    }
}

/// Drive `step` until it returns `Stop` or `token` is cancelled.
///
/// Returns the number of frames run.
pub fn run_frames(token: &CancellationToken, mut step: impl FnMut(u64) -> FrameControl) -> u64 {
    let mut frame_loop = FrameLoop::new(token.clone());
    while frame_loop.tick(&mut step) {}
    frame_loop.frames()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_until_stop() {
        let token = CancellationToken::new();
        let frames = run_frames(&token, |n| {
            if n == 4 {
                FrameControl::Stop
            } else {
                FrameControl::Continue
            }
        });
        assert_eq!(frames, 5);
    }

    #[test]
    fn test_cancel_from_step_stops_loop() {
        let token = CancellationToken::new();
        let inner = token.clone();
        let frames = run_frames(&token, |n| {
            if n == 2 {
                inner.cancel();
            }
            FrameControl::Continue
        });
        assert_eq!(frames, 3);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancelled_loop_runs_nothing() {
        let token = CancellationToken::new();
        token.cancel();

        let mut calls = 0;
        let frames = run_frames(&token, |_| {
            calls += 1;
            FrameControl::Continue
        });
        assert_eq!(frames, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_tick_reports_frame_index() {
        let mut frame_loop = FrameLoop::new(CancellationToken::new());
        let mut seen = Vec::new();
        for _ in 0..3 {
            assert!(frame_loop.tick(|n| {
                seen.push(n);
                FrameControl::Continue
            }));
        }
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(frame_loop.frames(), 3);
    }
}
