// Post-match feedback: name reveal, cue playback, and the advance that follows

use crate::engine::assets::ShapeBundle;
use crate::engine::audio::CuePlayer;
use log::warn;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackTiming {
    /// Placeholder pause for the celebration effect
    pub celebration: Duration,
    /// How long past the celebration to wait for the cue before giving up
    pub fallback_grace: Duration,
}

impl FeedbackTiming {
    /// Feedback ends no later than this, cue or no cue
    pub fn deadline(&self) -> Duration {
        self.celebration + self.fallback_grace
    }
}

/// Why feedback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEnd {
    CueFinished,
    Fallback,
}

/// Feedback for one accepted match; at most one is in flight at a time
#[derive(Debug)]
pub struct Feedback {
    shape: ShapeBundle,
    elapsed: Duration,
    timing: FeedbackTiming,
}

impl Feedback {
    /// Restart the shape's cue and begin the celebration
    pub fn start<P: CuePlayer + ?Sized>(
        shape: ShapeBundle,
        timing: FeedbackTiming,
        player: &mut P,
    ) -> Self {
        player.stop();
        player.play(shape.audio().get());
        Self {
            shape,
            elapsed: Duration::ZERO,
            timing,
        }
    }

    /// Advance time; returns how feedback ended once it has
    pub fn update<P: CuePlayer + ?Sized>(
        &mut self,
        dt: Duration,
        player: &mut P,
    ) -> Option<FeedbackEnd> {
        self.elapsed += dt;
        player.advance(dt);

        // the name stays up for the whole celebration even if the cue is short
        if !self.is_celebrating() && player.is_finished() {
            player.stop();
            return Some(FeedbackEnd::CueFinished);
        }
        if self.elapsed >= self.timing.deadline() {
            warn!(
                "No completion from cue for '{}' after {:.1}s, advancing",
                self.shape.name(),
                self.elapsed.as_secs_f32()
            );
            player.stop();
            return Some(FeedbackEnd::Fallback);
        }
        None
    }

    /// The matched shape, shown with its name while feedback runs
    pub fn shape(&self) -> &ShapeBundle {
        &self.shape
    }

    pub fn is_celebrating(&self) -> bool {
        self.elapsed < self.timing.celebration
    }
}
