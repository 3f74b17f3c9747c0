//! Slidereel CLI — batch image-to-slideshow video conversion.
//!
//! Usage:
//!   slidereel convert <IMAGE_DIR> <AUDIO> [OPTIONS]   Render batch videos
//!   slidereel check                                   Check backend availability

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "slidereel",
    about = "Batch slideshow videos from still images and an audio track",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image directory plus an audio track into batch videos
    Convert {
        /// Directory containing source images (jpg/jpeg/png)
        image_dir: PathBuf,

        /// Audio file shared across all batches
        audio: PathBuf,

        /// Output directory (defaults to <IMAGE_DIR>/output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Images per output video
        #[arg(long)]
        batch_size: Option<usize>,

        /// Seconds each image is shown
        #[arg(long)]
        clip_secs: Option<f64>,

        /// Output frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Target video bitrate (kbit/s)
        #[arg(long)]
        video_bitrate_kbps: Option<u32>,
    },

    /// Check media backend availability
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    slidereel_common::logging::init_logging(&slidereel_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
    });

    match cli.command {
        Commands::Convert {
            image_dir,
            audio,
            output,
            batch_size,
            clip_secs,
            fps,
            video_bitrate_kbps,
        } => {
            commands::convert::run(
                image_dir,
                audio,
                output,
                batch_size,
                clip_secs,
                fps,
                video_bitrate_kbps,
            )
            .await
        }
        Commands::Check => commands::check::run(),
    }
}
