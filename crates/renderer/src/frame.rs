//! Frame pacing and cancellation for the animation loop.
//!
//! Frames are strictly sequential: the loop owner calls [`FrameLoop::tick`]
//! once per frame, sleeps for whatever pacing interval is returned, paints,
//! and repeats. Cancellation is synchronous: once [`StopHandle::stop`] has
//! been called, the next `tick` reports [`Tick::Stopped`] and no further
//! frame runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag for a running [`FrameLoop`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Clamps the frame rate by reporting how long the caller should sleep
/// before painting the next frame. `None` or a non-positive cap means
/// every frame renders as fast as the loop spins.
#[derive(Debug)]
pub struct FramePacer {
    interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: Option<f32>) -> Self {
        let interval = target_fps
            .filter(|fps| *fps > 0.0)
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        Self {
            interval,
            last_frame: None,
        }
    }

    pub fn frame_interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Registers a frame at `now` and returns the sleep needed before the
    /// next one. Returns zero when uncapped or when the loop is behind.
    pub fn pace(&mut self, now: Instant) -> Duration {
        let Some(interval) = self.interval else {
            self.last_frame = Some(now);
            return Duration::ZERO;
        };
        let sleep = match self.last_frame {
            Some(last) => interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now + sleep);
        sleep
    }
}

/// Outcome of one scheduling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Paint a frame after sleeping for the given duration.
    Continue(Duration),
    /// The loop was cancelled; no further frame may run.
    Stopped,
}

/// The start/stop controller owning the pacing state and the cancellation
/// token. There is at most one pending frame at a time: the owner asks for
/// the next tick only after the previous frame has been painted.
#[derive(Debug)]
pub struct FrameLoop {
    pacer: FramePacer,
    handle: StopHandle,
}

impl FrameLoop {
    pub fn new(target_fps: Option<f32>) -> Self {
        Self {
            pacer: FramePacer::new(target_fps),
            handle: StopHandle::new(),
        }
    }

    /// A handle callers keep to cancel the loop from outside.
    pub fn handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn tick(&mut self, now: Instant) -> Tick {
        if self.handle.is_stopped() {
            return Tick::Stopped;
        }
        Tick::Continue(self.pacer.pace(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncapped_pacer_never_sleeps() {
        let mut pacer = FramePacer::new(None);
        let now = Instant::now();
        assert_eq!(pacer.pace(now), Duration::ZERO);
        assert_eq!(pacer.pace(now + Duration::from_millis(1)), Duration::ZERO);
    }

    #[test]
    fn zero_fps_means_uncapped() {
        assert_eq!(FramePacer::new(Some(0.0)).frame_interval(), None);
        assert_eq!(FramePacer::new(Some(-30.0)).frame_interval(), None);
    }

    #[test]
    fn capped_pacer_spaces_frames() {
        let mut pacer = FramePacer::new(Some(50.0));
        let interval = pacer.frame_interval().unwrap();
        let start = Instant::now();
        // First frame renders immediately.
        assert_eq!(pacer.pace(start), Duration::ZERO);
        // A frame arriving 5ms later still owes the rest of the 20ms budget.
        let sleep = pacer.pace(start + Duration::from_millis(5));
        assert_eq!(sleep, interval - Duration::from_millis(5));
        // A late frame is not paced at all.
        let sleep = pacer.pace(start + Duration::from_millis(200));
        assert_eq!(sleep, Duration::ZERO);
    }

    #[test]
    fn stop_is_observed_before_the_next_frame() {
        let mut frame_loop = FrameLoop::new(Some(60.0));
        let handle = frame_loop.handle();
        let now = Instant::now();
        assert!(matches!(frame_loop.tick(now), Tick::Continue(_)));
        handle.stop();
        assert_eq!(frame_loop.tick(now + Duration::from_millis(16)), Tick::Stopped);
        // Once stopped, the loop stays stopped.
        assert_eq!(frame_loop.tick(now + Duration::from_secs(1)), Tick::Stopped);
    }
}
