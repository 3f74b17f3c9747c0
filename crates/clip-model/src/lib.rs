//! Slidereel Clip Model
//!
//! Defines the planning data for slideshow conversion:
//! - **Clips:** Per-image visual clip specs with a linear zoom envelope
//! - **Batches:** Contiguous partitions of the sorted image list
//! - **Encoding:** Fixed output encoder settings
//!
//! This crate is pure computation — no I/O, no process spawning.
//! All inputs are data; all outputs are data.

pub mod batch;
pub mod clip;
pub mod encode;

pub use batch::*;
pub use clip::*;
pub use encode::*;
