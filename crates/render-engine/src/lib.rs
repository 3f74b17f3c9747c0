//! Slidereel Render Engine
//!
//! Orchestrates the external media backend (ffmpeg/ffprobe subprocesses)
//! to turn batches of still images plus one audio track into slideshow
//! videos with a linear zoom effect.
//!
//! # Pipeline Architecture
//!
//! ```text
//! images/*.{jpg,jpeg,png} ──┐
//!                           ├── Probe (native dimensions)
//! audio track ──┐           │            │
//!               │           │            ├── Zoom (per clip)
//!               │           │            │        │
//!               │           │            │        ├── Pad to canvas
//!               │           │            │        │        │
//!               ├── Probe (duration)     │        │        ├── Concat
//!               │                        │        │        │
//!               └── Leading sub-segment ─┴────────┴────────┤
//!                                                          ▼
//!                                                   Encode (H.264)
//!                                                          │
//!                                                          ▼
//!                                              video_batch_{N}.mp4
//! ```

pub mod encoder;
pub mod filter;
pub mod inputs;
pub mod pipeline;
pub mod probe;

pub use pipeline::*;
