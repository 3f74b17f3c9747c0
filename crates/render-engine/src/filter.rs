//! ffmpeg filter graph construction for batch rendering.
//!
//! Each image input becomes a `zoompan` stage that scales the frame from
//! the clip's start scale to its end scale around the frame center, then a
//! `pad` stage that centers the clip on the batch canvas so clips with
//! differing native sizes can be concatenated.

use slidereel_clip_model::clip::{ClipSpec, ZoomSpec};

/// zoompan scale expression for one clip.
///
/// zoompan evaluates once per output frame; `on` is the output frame
/// index, so elapsed time is `on / fps`.
pub fn zoom_expr(zoom: &ZoomSpec, duration_secs: f64, fps: u32) -> String {
    format!(
        "{start:.6}+{delta:.6}*(on/{fps})/{dur:.6}",
        start = zoom.start_scale,
        delta = zoom.end_scale - zoom.start_scale,
        fps = fps.max(1),
        dur = duration_secs.max(1e-6),
    )
}

/// Filter chain for one clip: zoom the still image, then center it on the
/// batch canvas. Labels the result `[v{index}]`.
pub fn clip_filter_chain(index: usize, clip: &ClipSpec, canvas: (u32, u32), fps: u32) -> String {
    let frames = (clip.duration_secs * fps.max(1) as f64).round().max(1.0) as u64;
    let z = zoom_expr(&clip.zoom, clip.duration_secs, fps);

    format!(
        "[{index}:v]zoompan=z='{z}':x='iw/2-(iw/zoom/2)':y='ih/2-(ih/zoom/2)':d={frames}:fps={fps}:s={w}x{h},pad={cw}:{ch}:(ow-iw)/2:(oh-ih)/2,setsar=1,format=yuv420p[v{index}]",
        fps = fps.max(1),
        w = clip.width,
        h = clip.height,
        cw = canvas.0,
        ch = canvas.1,
    )
}

/// Full filter graph for a batch: per-clip chains joined with the `concat`
/// filter into a single `[vout]` stream.
pub fn batch_filter_graph(clips: &[ClipSpec], canvas: (u32, u32), fps: u32) -> String {
    let chains: Vec<String> = clips
        .iter()
        .enumerate()
        .map(|(i, clip)| clip_filter_chain(i, clip, canvas, fps))
        .collect();

    let labels: String = (0..clips.len()).map(|i| format!("[v{i}]")).collect();

    format!(
        "{chains};{labels}concat=n={n}:v=1:a=0[vout]",
        chains = chains.join(";"),
        n = clips.len(),
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn clip(name: &str, w: u32, h: u32) -> ClipSpec {
        ClipSpec::new(PathBuf::from(name), w, h)
    }

    #[test]
    fn test_zoom_expr_encodes_linear_ramp() {
        let expr = zoom_expr(&ZoomSpec::default(), 2.0, 24);
        assert_eq!(expr, "1.000000+0.200000*(on/24)/2.000000");
    }

    #[test]
    fn test_clip_chain_has_center_anchor_and_native_size() {
        let chain = clip_filter_chain(0, &clip("a.jpg", 1920, 1080), (1920, 1080), 24);
        assert!(chain.starts_with("[0:v]zoompan="));
        assert!(chain.contains("x='iw/2-(iw/zoom/2)'"));
        assert!(chain.contains("y='ih/2-(ih/zoom/2)'"));
        assert!(chain.contains(":d=48:fps=24:s=1920x1080"));
        assert!(chain.ends_with("[v0]"));
    }

    #[test]
    fn test_clip_chain_pads_to_canvas_center() {
        let chain = clip_filter_chain(3, &clip("d.png", 800, 600), (1920, 1080), 24);
        assert!(chain.contains("pad=1920:1080:(ow-iw)/2:(oh-ih)/2"));
        assert!(chain.contains("s=800x600"));
        assert!(chain.ends_with("[v3]"));
    }

    #[test]
    fn test_batch_graph_concatenates_all_clips() {
        let clips = vec![clip("a.jpg", 640, 480), clip("b.jpg", 800, 600)];
        let graph = batch_filter_graph(&clips, (800, 600), 24);
        assert!(graph.contains("[v0][v1]concat=n=2:v=1:a=0[vout]"));
        assert_eq!(graph.matches("zoompan").count(), 2);
    }

    #[test]
    fn test_batch_graph_single_clip() {
        let clips = vec![clip("a.jpg", 640, 480)];
        let graph = batch_filter_graph(&clips, (640, 480), 24);
        assert!(graph.ends_with("[v0]concat=n=1:v=1:a=0[vout]"));
    }
}
