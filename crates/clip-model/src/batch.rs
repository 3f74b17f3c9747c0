//! Batch partitioning and output canvas sizing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::clip::ClipSpec;

/// Images per output video unless overridden.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// A contiguous group of images rendered together into one output video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// 1-based batch number, used in the output file name.
    pub index: usize,

    /// Image paths in global sorted order.
    pub images: Vec<PathBuf>,
}

impl Batch {
    /// Output file name for this batch (`video_batch_{N}.mp4`, no padding).
    pub fn output_file_name(&self) -> String {
        format!("video_batch_{}.mp4", self.index)
    }
}

/// Partition a sorted image list into contiguous, non-overlapping batches.
///
/// Batch boundaries depend only on position in the input slice: batch *i*
/// holds the 1-based positions `[size*(i-1)+1, size*i]`, with the final
/// batch holding the remainder.
pub fn partition_batches(images: &[PathBuf], batch_size: usize) -> Vec<Batch> {
    let batch_size = batch_size.max(1);
    images
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            index: i + 1,
            images: chunk.to_vec(),
        })
        .collect()
}

/// Output frame size accommodating every clip in a batch.
///
/// The canvas is the per-axis maximum of the clips' native dimensions,
/// rounded up to even (required by yuv420p output). Returns `None` for an
/// empty clip list.
pub fn canvas_for(clips: &[ClipSpec]) -> Option<(u32, u32)> {
    if clips.is_empty() {
        return None;
    }

    let width = clips.iter().map(|c| c.width).max().unwrap_or(0);
    let height = clips.iter().map(|c| c.height).max().unwrap_or(0);
    Some((round_up_even(width), round_up_even(height)))
}

fn round_up_even(v: u32) -> u32 {
    v + (v & 1)
}
