//! Input resolution: image enumeration, audio probing, output directory.

use std::path::{Path, PathBuf};

use slidereel_common::error::{SlidereelError, SlidereelResult};

use crate::probe;

/// Image extensions accepted by the resolver. Lowercase only; files with
/// upper or mixed-case extensions are not picked up.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// The run's shared audio resource: path plus probed total duration.
/// Probed once, then read (never written) by every batch's encoder child.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub path: PathBuf,
    pub duration_secs: f64,
}

/// Enumerate image files in `image_dir`, sorted ascending by path.
///
/// Fails `FileNotFound` if the directory is missing and `NoImages` if no
/// file matches the extension set.
pub fn list_images(image_dir: &Path) -> SlidereelResult<Vec<PathBuf>> {
    if !image_dir.exists() {
        return Err(SlidereelError::FileNotFound {
            path: image_dir.to_path_buf(),
        });
    }

    let mut images: Vec<PathBuf> = std::fs::read_dir(image_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
                .unwrap_or(false)
        })
        .collect();

    images.sort();

    if images.is_empty() {
        return Err(SlidereelError::NoImages {
            path: image_dir.to_path_buf(),
        });
    }

    Ok(images)
}

/// Open the shared audio track: existence check plus a one-shot duration
/// probe.
pub fn open_audio_track(audio_path: &Path) -> SlidereelResult<AudioTrack> {
    if !audio_path.exists() {
        return Err(SlidereelError::FileNotFound {
            path: audio_path.to_path_buf(),
        });
    }

    let duration_secs = probe::audio_duration_secs(audio_path)?;
    tracing::info!(
        audio = %audio_path.display(),
        duration_secs,
        "Audio track opened"
    );

    Ok(AudioTrack {
        path: audio_path.to_path_buf(),
        duration_secs,
    })
}

/// Create the output directory (and parents) if absent. Idempotent.
pub fn ensure_output_dir(output_dir: &Path) -> SlidereelResult<()> {
    std::fs::create_dir_all(output_dir)?;
    Ok(())
}
