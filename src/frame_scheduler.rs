//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};
use log::{info, warn};

use crate::{Renderer, SinkError, StripSink};

/// Default frame period (50 FPS).
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(20);

/// Minimum spacing between two heartbeat log lines.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(1);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Outcome of handing the frame to the strip.
    pub emitted: Result<(), SinkError>,
    /// Whether a heartbeat line was logged during this tick.
    pub heartbeat: bool,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Calls the renderer and the strip sink
/// - Reports sink failures without stopping the loop
/// - Logs a heartbeat with the uptime at most once per second
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, sink);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<'a, S: StripSink, const N: usize> {
    sink: S,
    renderer: Renderer<'a, N>,
    next_frame: Instant,
    frame_duration: Duration,
    next_heartbeat: Instant,
    sink_failing: bool,
    failed_frames: u32,
}

impl<'a, S: StripSink, const N: usize> FrameScheduler<'a, S, N> {
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (20 ms) for frame timing.
    pub fn new(renderer: Renderer<'a, N>, sink: S) -> Self {
        Self::with_frame_duration(renderer, sink, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(renderer: Renderer<'a, N>, sink: S, frame_duration: Duration) -> Self {
        Self {
            sink,
            renderer,
            next_frame: Instant::from_millis(0),
            frame_duration,
            next_heartbeat: Instant::from_millis(0),
            sink_failing: false,
            failed_frames: 0,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Renders the current frame
    /// 3. Writes to the strip sink, logging failures
    /// 4. Logs the heartbeat if it is due
    /// 5. Returns the deadline for the next frame
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift_ms = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift_ms {
            self.next_frame = now;
        }

        let frame = self.renderer.render();
        let emitted = self.sink.emit(frame);
        self.report(emitted);

        let heartbeat = now >= self.next_heartbeat;
        if heartbeat {
            info!("still here, uptime {} ms", now.as_millis());
            self.next_heartbeat = now + HEARTBEAT_INTERVAL;
        }

        self.next_frame += self.frame_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            emitted,
            heartbeat,
        }
    }

    /// Log the first failure of a streak and the recovery, not every frame
    fn report(&mut self, emitted: Result<(), SinkError>) {
        match emitted {
            Err(err) => {
                self.failed_frames = self.failed_frames.saturating_add(1);
                if !self.sink_failing {
                    warn!("unable to update led strip: {}", err);
                    self.sink_failing = true;
                }
            }
            Ok(()) if self.sink_failing => {
                info!("led strip update recovered after {} frames", self.failed_frames);
                self.sink_failing = false;
                self.failed_frames = 0;
            }
            Ok(()) => {}
        }
    }

    /// Number of consecutive frames the sink rejected.
    pub fn failed_frames(&self) -> u32 {
        self.failed_frames
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, N> {
        &self.renderer
    }

    /// Get a reference to the strip sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
