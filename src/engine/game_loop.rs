/// Frame timing for the event loop
///
/// The game has no physics to step, so instead of a fixed-timestep
/// accumulator each frame simply reports how much time passed since the last
/// one. Deltas are capped so a stalled window (dragged, minimised) cannot
/// fire every pending timer in one frame.
use std::time::{Duration, Instant};

/// Largest delta reported for a single frame
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
        }
    }

    /// Begin a new frame, returning the (capped) time since the previous one
    pub fn begin_frame(&mut self) -> Duration {
        self.begin_frame_at(Instant::now())
    }

    fn begin_frame_at(&mut self, now: Instant) -> Duration {
        let frame_time = now.saturating_duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        frame_time.min(MAX_FRAME_DELTA)
    }

    /// Average FPS over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.frame_times.iter().sum();
        if self.frame_times.is_empty() || total.is_zero() {
            return 0.0;
        }
        self.frame_times.len() as f32 / total.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
