//! ffmpeg invocation for batch encoding.

use std::path::Path;
use std::process::Command;

use slidereel_clip_model::clip::ClipSpec;
use slidereel_clip_model::encode::EncodeSettings;
use slidereel_common::error::{SlidereelError, SlidereelResult};

/// Build the complete ffmpeg argument vector for one batch.
///
/// Image inputs come first in clip order, then (optionally) the audio
/// input limited to `audio.1` seconds — the leading sub-segment attached
/// to the batch. Decoded media lives entirely inside the spawned child,
/// so resources are released when it exits, on success and failure alike.
pub fn encode_args(
    clips: &[ClipSpec],
    filter_graph: &str,
    audio: Option<(&Path, f64)>,
    settings: &EncodeSettings,
    output_path: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
    ];

    for clip in clips {
        args.push("-i".to_string());
        args.push(clip.image_path.display().to_string());
    }

    if let Some((audio_path, secs)) = audio {
        args.push("-t".to_string());
        args.push(format!("{secs:.6}"));
        args.push("-i".to_string());
        args.push(audio_path.display().to_string());
    }

    args.push("-filter_complex".to_string());
    args.push(filter_graph.to_string());
    args.push("-map".to_string());
    args.push("[vout]".to_string());

    if audio.is_some() {
        args.push("-map".to_string());
        args.push(format!("{}:a:0", clips.len()));
        args.push("-c:a".to_string());
        args.push(settings.audio_codec.clone());
        args.push("-b:a".to_string());
        args.push(format!("{}k", settings.audio_bitrate_kbps));
    }

    args.push("-r".to_string());
    args.push(settings.fps.to_string());
    args.push("-c:v".to_string());
    args.push(settings.video_codec.clone());
    args.push("-b:v".to_string());
    args.push(format!("{}k", settings.video_bitrate_kbps));
    args.push("-pix_fmt".to_string());
    args.push("yuv420p".to_string());
    args.push("-threads".to_string());
    args.push(settings.threads.to_string());
    args.push("-movflags".to_string());
    args.push("+faststart".to_string());

    args.push(output_path.display().to_string());
    args
}

/// Run ffmpeg with the given arguments, capturing stderr for diagnostics.
pub fn run_ffmpeg(args: &[String]) -> SlidereelResult<()> {
    tracing::debug!(args = ?args, "Running ffmpeg");

    let output = Command::new("ffmpeg")
        .args(args)
        .output()
        .map_err(|e| SlidereelError::render(format!("Failed to start ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SlidereelError::render(format!(
            "ffmpeg encode failed (status {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Check whether a backend binary is reachable on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
