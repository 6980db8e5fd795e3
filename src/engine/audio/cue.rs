// Audio cue format detection

use std::time::Duration;

/// Container formats accepted for cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioDecodeError {
    #[error("audio data is empty")]
    Empty,

    #[error("unrecognized audio format")]
    UnknownFormat,

    #[error("malformed WAV data: {0}")]
    MalformedWav(&'static str),
}

/// A validated, playable cue
#[derive(Debug, Clone)]
pub struct AudioCue {
    format: AudioFormat,
    bytes: Vec<u8>,
    duration: Option<Duration>,
}

impl AudioCue {
    /// Sniff the container and, where the header allows it, compute the length
    pub fn decode(bytes: &[u8]) -> Result<Self, AudioDecodeError> {
        if bytes.is_empty() {
            return Err(AudioDecodeError::Empty);
        }

        let (format, duration) = if bytes.starts_with(b"RIFF") {
            (AudioFormat::Wav, Some(wav_duration(bytes)?))
        } else if bytes.starts_with(b"OggS") {
            (AudioFormat::Ogg, None)
        } else if bytes.starts_with(b"ID3") || is_mpeg_frame_sync(bytes) {
            (AudioFormat::Mp3, None)
        } else {
            return Err(AudioDecodeError::UnknownFormat);
        };

        Ok(Self {
            format,
            bytes: bytes.to_vec(),
            duration,
        })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Playback length, when the container header states it
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
}

fn is_mpeg_frame_sync(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0
}

fn read_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let slice = bytes.get(at..at + 4)?;
    Some(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
}

/// Walk the RIFF chunks for `fmt ` (byte rate) and `data` (payload size)
fn wav_duration(bytes: &[u8]) -> Result<Duration, AudioDecodeError> {
    if bytes.get(8..12) != Some(b"WAVE".as_slice()) {
        return Err(AudioDecodeError::MalformedWav("missing WAVE tag"));
    }

    let mut byte_rate = None;
    let mut data_len = None;
    let mut offset = 12;

    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4)
            .ok_or(AudioDecodeError::MalformedWav("truncated chunk header"))? as usize;
        let body = offset + 8;

        match id {
            b"fmt " => {
                byte_rate = Some(
                    read_u32(bytes, body + 8)
                        .ok_or(AudioDecodeError::MalformedWav("truncated fmt chunk"))?,
                );
            }
            b"data" => data_len = Some(size),
            _ => {}
        }

        // chunks are word aligned
        offset = body.saturating_add(size).saturating_add(size & 1);
    }

    let byte_rate = byte_rate.ok_or(AudioDecodeError::MalformedWav("missing fmt chunk"))?;
    let data_len = data_len.ok_or(AudioDecodeError::MalformedWav("missing data chunk"))?;
    if byte_rate == 0 {
        return Err(AudioDecodeError::MalformedWav("zero byte rate"));
    }

    Ok(Duration::from_secs_f64(data_len as f64 / byte_rate as f64))
}

#[cfg(test)]
pub(crate) fn wav_bytes(sample_rate: u32, seconds: f32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits: u16 = 16;
    let byte_rate = sample_rate * u32::from(channels) * u32::from(bits) / 8;
    let data_len = (byte_rate as f32 * seconds) as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&(channels * bits / 8).to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(out.len() + data_len as usize, 0);
    out
}
