//! Media probing via ffprobe.
//!
//! Parsing is split from process invocation so the text handling can be
//! tested without the backend installed.

use std::path::Path;
use std::process::Command;

use slidereel_common::error::{SlidereelError, SlidereelResult};

/// Probe the pixel dimensions of an image file.
pub fn image_dimensions(path: &Path) -> SlidereelResult<(u32, u32)> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height",
            "-of",
            "csv=p=0:s=x",
        ])
        .arg(path)
        .output()
        .map_err(|e| SlidereelError::probe(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(SlidereelError::probe(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_dimensions(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        SlidereelError::probe(format!(
            "ffprobe returned no dimensions for {}",
            path.display()
        ))
    })
}

/// Probe the total duration of an audio file in seconds.
pub fn audio_duration_secs(path: &Path) -> SlidereelResult<f64> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "csv=p=0",
        ])
        .arg(path)
        .output()
        .map_err(|e| SlidereelError::probe(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(SlidereelError::probe(format!(
            "ffprobe failed for {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    parse_duration(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        SlidereelError::probe(format!(
            "ffprobe returned no duration for {}",
            path.display()
        ))
    })
}

fn parse_dimensions(raw: &str) -> Option<(u32, u32)> {
    let line = raw.lines().next()?.trim();
    let (w, h) = line.split_once('x')?;
    let width = w.parse::<u32>().ok()?;
    let height = h.parse::<u32>().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

fn parse_duration(raw: &str) -> Option<f64> {
    let value = raw.lines().next()?.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1920x1080\n"), Some((1920, 1080)));
        assert_eq!(parse_dimensions("640x480"), Some((640, 480)));
    }

    #[test]
    fn test_parse_dimensions_takes_first_stream() {
        assert_eq!(parse_dimensions("800x600\n1024x768\n"), Some((800, 600)));
    }

    #[test]
    fn test_parse_dimensions_rejects_garbage() {
        assert_eq!(parse_dimensions(""), None);
        assert_eq!(parse_dimensions("not-a-size"), None);
        assert_eq!(parse_dimensions("1920x"), None);
        assert_eq!(parse_dimensions("0x1080"), None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("46.123456\n"), Some(46.123456));
        assert_eq!(parse_duration("0.0"), Some(0.0));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("N/A\n"), None);
        assert_eq!(parse_duration("-3.0"), None);
        assert_eq!(parse_duration("inf"), None);
    }
}
