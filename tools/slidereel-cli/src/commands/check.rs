//! Check media backend availability.

use slidereel_render_engine::encoder::command_exists;

pub fn run() -> anyhow::Result<()> {
    println!("Slidereel System Check");
    println!("{}", "=".repeat(50));

    let ffmpeg = command_exists("ffmpeg");
    let ffprobe = command_exists("ffprobe");

    println!("{} ffmpeg", if ffmpeg { "[OK]" } else { "[MISSING]" });
    println!("{} ffprobe", if ffprobe { "[OK]" } else { "[MISSING]" });

    println!();
    if ffmpeg && ffprobe {
        println!("All required tools are available. Slidereel is ready.");
    } else {
        println!("Install ffmpeg (which also provides ffprobe) and ensure it is on PATH.");
    }

    Ok(())
}
