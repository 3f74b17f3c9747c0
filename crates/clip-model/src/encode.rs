//! Fixed encoder settings for output videos.

use serde::{Deserialize, Serialize};

/// Encoder configuration applied to every batch output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Output frame rate.
    pub fps: u32,

    /// Video codec name passed to the backend.
    pub video_codec: String,

    /// Audio codec name passed to the backend.
    pub audio_codec: String,

    /// Target video bitrate (kbit/s).
    pub video_bitrate_kbps: u32,

    /// Target audio bitrate (kbit/s).
    pub audio_bitrate_kbps: u32,

    /// Encoder thread count.
    pub threads: u32,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            fps: 24,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            video_bitrate_kbps: 4000,
            audio_bitrate_kbps: 192,
            threads: 2,
        }
    }
}

impl EncodeSettings {
    /// Frames rendered for a clip of `duration_secs`.
    pub fn frames_for(&self, duration_secs: f64) -> u64 {
        (duration_secs * self.fps as f64).round() as u64
    }
}
