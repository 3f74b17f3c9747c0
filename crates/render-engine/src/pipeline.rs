//! The batch conversion pipeline.
//!
//! Recovery is three-tiered and explicit: a failed image probe skips that
//! image, a failed batch is abandoned and logged, and only input
//! resolution or audio probe failures abort the run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use slidereel_clip_model::batch::{canvas_for, partition_batches, Batch};
use slidereel_clip_model::clip::ClipSpec;
use slidereel_clip_model::encode::EncodeSettings;
use slidereel_common::error::{SlidereelError, SlidereelResult};

use crate::inputs::{self, AudioTrack};
use crate::{encoder, filter, probe};

/// A conversion job ready to run.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Directory containing the source images.
    pub image_dir: PathBuf,

    /// Audio track shared across all batches.
    pub audio_path: PathBuf,

    /// Directory receiving the output videos.
    pub output_dir: PathBuf,

    /// Images per output video.
    pub batch_size: usize,

    /// Seconds each image is shown.
    pub clip_secs: f64,

    /// Encoder settings.
    pub encode: EncodeSettings,
}

/// An image dropped from its batch, with the probe error that caused it.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one batch attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The batch was encoded to disk.
    Written {
        index: usize,
        output: PathBuf,
        clip_count: usize,
        skipped: Vec<SkippedImage>,
        duration_secs: f64,
        audio_attached: bool,
    },

    /// The batch produced no usable output and the run moved on.
    Abandoned {
        index: usize,
        reason: String,
        skipped: Vec<SkippedImage>,
    },
}

impl BatchOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Written { index, .. } | Self::Abandoned { index, .. } => *index,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Aggregate result of a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub batches: Vec<BatchOutcome>,
}

impl RunSummary {
    pub fn batches_written(&self) -> usize {
        self.batches.iter().filter(|b| b.is_written()).count()
    }

    pub fn batches_abandoned(&self) -> usize {
        self.batches.len() - self.batches_written()
    }

    pub fn images_converted(&self) -> usize {
        self.batches
            .iter()
            .map(|b| match b {
                BatchOutcome::Written { clip_count, .. } => *clip_count,
                BatchOutcome::Abandoned { .. } => 0,
            })
            .sum()
    }

    pub fn images_skipped(&self) -> usize {
        self.batches
            .iter()
            .map(|b| match b {
                BatchOutcome::Written { skipped, .. }
                | BatchOutcome::Abandoned { skipped, .. } => skipped.len(),
            })
            .sum()
    }
}

/// Everything needed to encode one batch.
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub index: usize,
    pub clips: Vec<ClipSpec>,
    pub canvas: (u32, u32),
    pub duration_secs: f64,
    pub audio_attached: bool,
    pub output_path: PathBuf,
    pub args: Vec<String>,
}

/// Run a full conversion job.
///
/// This is the main entry point. Input resolution failures abort; batch
/// failures are recorded in the summary and the run continues.
pub async fn run_conversion(job: ConversionJob) -> SlidereelResult<RunSummary> {
    tracing::info!(
        images = %job.image_dir.display(),
        audio = %job.audio_path.display(),
        output = %job.output_dir.display(),
        "Starting conversion"
    );

    let images = inputs::list_images(&job.image_dir)?;
    tracing::info!(count = images.len(), "Found image files");

    if !encoder::command_exists("ffmpeg") || !encoder::command_exists("ffprobe") {
        return Err(SlidereelError::unsupported(
            "No supported media backend found (expected ffmpeg and ffprobe in PATH)",
        ));
    }

    let audio = inputs::open_audio_track(&job.audio_path)?;
    inputs::ensure_output_dir(&job.output_dir)?;

    let batches = partition_batches(&images, job.batch_size);
    tracing::info!(batches = batches.len(), "Partitioned image list");

    let mut outcomes = Vec::with_capacity(batches.len());
    for batch in &batches {
        outcomes.push(render_batch(batch, &audio, &job));
    }

    let summary = RunSummary { batches: outcomes };
    tracing::info!(
        written = summary.batches_written(),
        abandoned = summary.batches_abandoned(),
        images_converted = summary.images_converted(),
        images_skipped = summary.images_skipped(),
        "All batches processed"
    );

    Ok(summary)
}

/// Attempt one batch: build clips, plan, encode. Never propagates batch
/// failures; they become an `Abandoned` outcome.
pub fn render_batch(batch: &Batch, audio: &AudioTrack, job: &ConversionJob) -> BatchOutcome {
    tracing::info!(
        batch = batch.index,
        images = batch.images.len(),
        "Processing batch"
    );

    let (clips, skipped) = build_clips(&batch.images, job.clip_secs);

    let result = plan_batch(batch, &clips, audio, &job.encode, &job.output_dir).and_then(|plan| {
        tracing::info!(
            batch = plan.index,
            output = %plan.output_path.display(),
            duration_secs = plan.duration_secs,
            audio_attached = plan.audio_attached,
            "Encoding batch"
        );
        encoder::run_ffmpeg(&plan.args)?;
        Ok(plan)
    });

    match result {
        Ok(plan) => {
            tracing::info!(batch = plan.index, "Batch complete");
            BatchOutcome::Written {
                index: plan.index,
                output: plan.output_path,
                clip_count: plan.clips.len(),
                skipped,
                duration_secs: plan.duration_secs,
                audio_attached: plan.audio_attached,
            }
        }
        Err(e) => {
            tracing::error!(batch = batch.index, error = %e, "Batch failed");
            BatchOutcome::Abandoned {
                index: batch.index,
                reason: e.to_string(),
                skipped,
            }
        }
    }
}

/// Probe every image in a batch, producing clip specs for the ones that
/// load and skip records for the ones that don't.
pub fn build_clips(images: &[PathBuf], clip_secs: f64) -> (Vec<ClipSpec>, Vec<SkippedImage>) {
    let mut clips = Vec::with_capacity(images.len());
    let mut skipped = Vec::new();

    for image in images {
        tracing::debug!(image = %image.display(), "Probing image");
        match probe::image_dimensions(image) {
            Ok((width, height)) => {
                let mut clip = ClipSpec::new(image.clone(), width, height);
                clip.duration_secs = clip_secs;
                clips.push(clip);
            }
            Err(e) => {
                tracing::warn!(image = %image.display(), error = %e, "Skipping image");
                skipped.push(SkippedImage {
                    path: image.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (clips, skipped)
}

/// Build the encode plan for one batch. Pure given the built clips and the
/// probed audio duration.
///
/// Audio is attached only when the track covers the whole batch; a shorter
/// track yields a silent video with a warning, not an error.
pub fn plan_batch(
    batch: &Batch,
    clips: &[ClipSpec],
    audio: &AudioTrack,
    settings: &EncodeSettings,
    output_dir: &Path,
) -> SlidereelResult<BatchPlan> {
    let canvas = canvas_for(clips).ok_or_else(|| {
        SlidereelError::processing(format!(
            "No images in batch {} could be processed",
            batch.index
        ))
    })?;

    let duration_secs: f64 = clips.iter().map(|c| c.duration_secs).sum();
    let audio_attached = audio.duration_secs >= duration_secs;
    if !audio_attached {
        tracing::warn!(
            batch = batch.index,
            audio_secs = audio.duration_secs,
            video_secs = duration_secs,
            "Audio track shorter than batch video; writing silent video"
        );
    }

    let graph = filter::batch_filter_graph(clips, canvas, settings.fps);
    let output_path = output_dir.join(batch.output_file_name());
    let audio_input = audio_attached.then(|| (audio.path.as_path(), duration_secs));
    let args = encoder::encode_args(clips, &graph, audio_input, settings, &output_path);

    Ok(BatchPlan {
        index: batch.index,
        clips: clips.to_vec(),
        canvas,
        duration_secs,
        audio_attached,
        output_path,
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_batch(index: usize, names: &[&str]) -> Batch {
        Batch {
            index,
            images: names.iter().map(PathBuf::from).collect(),
        }
    }

    fn test_clips(names: &[&str]) -> Vec<ClipSpec> {
        names
            .iter()
            .map(|n| ClipSpec::new(PathBuf::from(n), 1280, 720))
            .collect()
    }

    fn audio(duration_secs: f64) -> AudioTrack {
        AudioTrack {
            path: PathBuf::from("track.m4a"),
            duration_secs,
        }
    }

    #[test]
    fn test_plan_empty_batch_is_processing_error() {
        let batch = test_batch(2, &["a.jpg"]);
        let err = plan_batch(
            &batch,
            &[],
            &audio(60.0),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap_err();
        assert!(matches!(err, SlidereelError::Processing { .. }));
    }

    #[test]
    fn test_plan_duration_counts_surviving_clips_only() {
        // One image of the original ten failed to probe.
        let batch = test_batch(
            1,
            &["0.jpg", "1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "7.jpg", "8.jpg", "9.jpg"],
        );
        let clips = test_clips(&["0.jpg", "1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg", "7.jpg", "8.jpg"]);
        let plan = plan_batch(
            &batch,
            &clips,
            &audio(60.0),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(plan.clips.len(), 9);
        assert!((plan.duration_secs - 18.0).abs() < 1e-9);
        assert!(plan.audio_attached);
    }

    #[test]
    fn test_plan_attaches_audio_prefix_of_exact_duration() {
        let batch = test_batch(1, &["0.jpg"]);
        let clips = test_clips(&["0.jpg", "1.jpg"]);
        let plan = plan_batch(
            &batch,
            &clips,
            &audio(4.0),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap();
        // D == C is the boundary: still attached
        assert!(plan.audio_attached);
        assert!(plan.args.iter().any(|a| a == "4.000000"));
    }

    #[test]
    fn test_plan_short_audio_yields_silent_video() {
        let batch = test_batch(1, &["0.jpg"]);
        let clips = test_clips(&["0.jpg", "1.jpg", "2.jpg"]);
        let plan = plan_batch(
            &batch,
            &clips,
            &audio(5.9),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap();
        assert!(!plan.audio_attached);
        assert!(!plan.args.iter().any(|a| a == "-c:a"));
    }

    #[test]
    fn test_plan_output_path_uses_batch_index() {
        let batch = test_batch(3, &["0.jpg"]);
        let clips = test_clips(&["0.jpg"]);
        let plan = plan_batch(
            &batch,
            &clips,
            &audio(60.0),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(plan.output_path, Path::new("out").join("video_batch_3.mp4"));
    }

    #[test]
    fn test_plan_canvas_covers_largest_clip() {
        let batch = test_batch(1, &["0.jpg"]);
        let clips = vec![
            ClipSpec::new(PathBuf::from("a.jpg"), 1920, 800),
            ClipSpec::new(PathBuf::from("b.jpg"), 1280, 1079),
        ];
        let plan = plan_batch(
            &batch,
            &clips,
            &audio(60.0),
            &EncodeSettings::default(),
            Path::new("out"),
        )
        .unwrap();
        assert_eq!(plan.canvas, (1920, 1080));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = BatchOutcome::Abandoned {
            index: 4,
            reason: "encode failed".to_string(),
            skipped: vec![],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "abandoned");
        assert_eq!(json["index"], 4);
    }

    #[test]
    fn test_summary_counts() {
        let summary = RunSummary {
            batches: vec![
                BatchOutcome::Written {
                    index: 1,
                    output: PathBuf::from("out/video_batch_1.mp4"),
                    clip_count: 10,
                    skipped: vec![],
                    duration_secs: 20.0,
                    audio_attached: true,
                },
                BatchOutcome::Abandoned {
                    index: 2,
                    reason: "No images in batch 2 could be processed".to_string(),
                    skipped: vec![SkippedImage {
                        path: PathBuf::from("bad.jpg"),
                        reason: "probe failed".to_string(),
                    }],
                },
            ],
        };
        assert_eq!(summary.batches_written(), 1);
        assert_eq!(summary.batches_abandoned(), 1);
        assert_eq!(summary.images_converted(), 10);
        assert_eq!(summary.images_skipped(), 1);
    }
}
