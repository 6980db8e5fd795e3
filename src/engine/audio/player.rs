// Cue playback

use super::AudioCue;
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::time::Duration;

/// Plays one cue at a time and reports when it has finished
///
/// Completion is polled, not pushed: the caller checks `is_finished()` after
/// each `advance()`. Implementations may never report completion.
pub trait CuePlayer {
    /// Start a cue from the beginning, replacing anything already playing
    fn play(&mut self, cue: &AudioCue);

    /// Stop playback and clear any pending completion
    fn stop(&mut self);

    /// Move playback time forward
    fn advance(&mut self, dt: Duration);

    fn is_finished(&self) -> bool;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&mut self, cue: &AudioCue) {
        (**self).play(cue)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn advance(&mut self, dt: Duration) {
        (**self).advance(dt)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioOutputError {
    #[error("No audio output device: {0}")]
    NoDevice(#[from] rodio::StreamError),
}

/// Streaming source for a cue
fn cue_source(cue: &AudioCue) -> Result<Decoder<Cursor<Vec<u8>>>, rodio::decoder::DecoderError> {
    Decoder::new(Cursor::new(cue.bytes().to_vec()))
}

/// Plays cues on the default output device
///
/// Each cue gets a fresh sink; the cue is finished once that sink drains.
/// A cue that fails to decode or start never finishes, leaving the caller's
/// fallback timer to move on.
pub struct DeviceCuePlayer {
    // dropping the stream silences every sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl DeviceCuePlayer {
    /// Open the system's default output device
    pub fn try_default() -> Result<Self, AudioOutputError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }
}

impl CuePlayer for DeviceCuePlayer {
    fn play(&mut self, cue: &AudioCue) {
        self.stop();

        let source = match cue_source(cue) {
            Ok(source) => source,
            Err(e) => {
                warn!("Cannot play {:?} cue: {}", cue.format(), e);
                return;
            }
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(source);
                debug!("Playing {:?} cue", cue.format());
                self.sink = Some(sink);
            }
            Err(e) => warn!("Failed to open audio sink: {}", e),
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    // the device clock drives playback
    fn advance(&mut self, _dt: Duration) {}

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|sink| sink.empty())
    }
}

/// Player with no output device that tracks playback time from the cue header
///
/// Nothing is audible, so a cue of unknown length counts as finished at once
/// and the celebration pause alone paces the game.
#[derive(Debug, Default)]
pub struct TimedCuePlayer {
    remaining: Option<Duration>,
    playing: bool,
}

impl TimedCuePlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CuePlayer for TimedCuePlayer {
    fn play(&mut self, cue: &AudioCue) {
        self.remaining = Some(cue.duration().unwrap_or(Duration::ZERO));
        self.playing = true;
        match cue.duration() {
            Some(d) => debug!("Timing {:?} cue ({:.2}s)", cue.format(), d.as_secs_f32()),
            None => debug!("{:?} cue of unknown length, nothing to wait for", cue.format()),
        }
    }

    fn stop(&mut self) {
        self.remaining = None;
        self.playing = false;
    }

    fn advance(&mut self, dt: Duration) {
        if !self.playing {
            return;
        }
        if let Some(remaining) = self.remaining {
            self.remaining = Some(remaining.saturating_sub(dt));
        }
    }

    fn is_finished(&self) -> bool {
        self.playing && self.remaining.is_some_and(|left| left.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::cue::wav_bytes;
    use rodio::Source;

    #[test]
    fn test_known_length_cue_finishes() {
        let cue = AudioCue::decode(&wav_bytes(8_000, 0.5)).unwrap();
        let mut player = TimedCuePlayer::new();
        player.play(&cue);

        player.advance(Duration::from_millis(300));
        assert!(!player.is_finished());

        player.advance(Duration::from_millis(300));
        assert!(player.is_finished());
    }

    #[test]
    fn test_unknown_length_cue_finishes_at_once() {
        let cue = AudioCue::decode(b"ID3\x04\x00").unwrap();
        let mut player = TimedCuePlayer::new();
        player.play(&cue);
        assert!(player.is_finished());
    }

    #[test]
    fn test_stop_clears_completion() {
        let cue = AudioCue::decode(&wav_bytes(8_000, 0.1)).unwrap();
        let mut player = TimedCuePlayer::new();
        player.play(&cue);
        player.advance(Duration::from_secs(1));
        assert!(player.is_finished());

        player.stop();
        assert!(!player.is_finished());
    }

    #[test]
    fn test_idle_player_never_finishes() {
        let mut player = TimedCuePlayer::new();
        player.advance(Duration::from_secs(1));
        assert!(!player.is_finished());
    }

    #[test]
    fn test_boxed_player_forwards() {
        let cue = AudioCue::decode(&wav_bytes(8_000, 0.2)).unwrap();
        let mut player: Box<dyn CuePlayer> = Box::new(TimedCuePlayer::new());
        player.play(&cue);
        player.advance(Duration::from_millis(250));
        assert!(player.is_finished());

        player.stop();
        assert!(!player.is_finished());
    }

    #[test]
    fn test_wav_cue_decodes_for_device_playback() {
        let cue = AudioCue::decode(&wav_bytes(8_000, 0.5)).unwrap();
        let source = cue_source(&cue).unwrap();
        assert_eq!(source.sample_rate(), 8_000);
        assert_eq!(source.channels(), 1);
    }
}
