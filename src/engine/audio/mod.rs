// Audio cues: decoding and the playback seam
//
// Cues are sniffed and validated at load time. Playback goes through the
// `CuePlayer` trait so the game only ever waits on `is_finished()`, and never
// assumes the completion signal will arrive. `DeviceCuePlayer` plays through
// rodio; `TimedCuePlayer` stands in when there is no output device.

mod cue;
mod player;

pub use cue::AudioCue;
pub use player::{CuePlayer, DeviceCuePlayer, TimedCuePlayer};
