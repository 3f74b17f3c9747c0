//! Convert an image directory plus an audio track into batch videos.

use std::path::PathBuf;

use slidereel_clip_model::encode::EncodeSettings;
use slidereel_common::config::AppConfig;
use slidereel_render_engine::pipeline::{run_conversion, BatchOutcome, ConversionJob};

pub async fn run(
    image_dir: PathBuf,
    audio: PathBuf,
    output: Option<PathBuf>,
    batch_size: Option<usize>,
    clip_secs: Option<f64>,
    fps: Option<u32>,
    video_bitrate_kbps: Option<u32>,
) -> anyhow::Result<()> {
    let defaults = AppConfig::load().conversion;
    let output_dir = output.unwrap_or_else(|| image_dir.join("output"));

    let encode = EncodeSettings {
        fps: fps.unwrap_or(defaults.fps),
        video_bitrate_kbps: video_bitrate_kbps.unwrap_or(defaults.video_bitrate_kbps),
        threads: defaults.encode_threads,
        ..EncodeSettings::default()
    };

    let job = ConversionJob {
        image_dir,
        audio_path: audio,
        output_dir: output_dir.clone(),
        batch_size: batch_size.unwrap_or(defaults.batch_size),
        clip_secs: clip_secs.unwrap_or(defaults.clip_secs),
        encode,
    };

    println!("Converting images at: {}", job.image_dir.display());
    println!("  Audio: {}", job.audio_path.display());
    println!("  Output: {}", output_dir.display());

    let summary = run_conversion(job).await?;

    println!();
    for outcome in &summary.batches {
        match outcome {
            BatchOutcome::Written {
                index,
                output,
                clip_count,
                skipped,
                duration_secs,
                audio_attached,
            } => {
                let audio_note = if *audio_attached { "" } else { ", silent" };
                let skip_note = if skipped.is_empty() {
                    String::new()
                } else {
                    format!(", {} skipped", skipped.len())
                };
                println!(
                    "  Batch {index}: {} ({clip_count} images, {duration_secs:.0}s{audio_note}{skip_note})",
                    output.display()
                );
            }
            BatchOutcome::Abandoned { index, reason, .. } => {
                println!("  Batch {index}: abandoned ({reason})");
            }
        }
    }

    println!();
    println!(
        "{} batch(es) written, {} abandoned; {} image(s) converted, {} skipped.",
        summary.batches_written(),
        summary.batches_abandoned(),
        summary.images_converted(),
        summary.images_skipped()
    );

    Ok(())
}
