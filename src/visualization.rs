use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rerun::{RecordingStream, RecordingStreamResult, TimeCell};

use crate::footprint::GroundFootprint;
use crate::types::GeoCoord;

/// Stable pseudo-random colour per frame id.
pub fn id_to_color(id: i64) -> (u8, u8, u8, u8) {
    let mut rng = ChaCha8Rng::seed_from_u64(id as u64);
    let color_num = rng.random_range(0..2u32.pow(24));
    (
        ((color_num >> 16) % 256) as u8,
        ((color_num >> 8) % 256) as u8,
        (color_num % 256) as u8,
        255,
    )
}

/// Degrees east and north of `anchor`, for display only.
pub fn display_offset(anchor: GeoCoord, c: GeoCoord) -> (f32, f32) {
    ((c.lon - anchor.lon) as f32, (c.lat - anchor.lat) as f32)
}

/// Closed outline through the edge midpoints: top, right, bottom, left, top.
pub fn footprint_outline(anchor: GeoCoord, footprint: &GroundFootprint) -> Vec<(f32, f32)> {
    let e = &footprint.rotated_coordinates;
    [e.top, e.right, e.bottom, e.left, e.top]
        .into_iter()
        .map(|c| display_offset(anchor, c))
        .collect()
}

/// Logs one frame's footprint and camera position on the `frame` timeline.
pub fn log_footprint(
    recording: &RecordingStream,
    anchor: GeoCoord,
    id: i64,
    footprint: &GroundFootprint,
) -> RecordingStreamResult<()> {
    let strip = rerun::components::LineStrip2D::from_iter(
        footprint_outline(anchor, footprint)
            .into_iter()
            .map(|(x, y)| [x, y]),
    );

    recording.set_time("frame", TimeCell::from_sequence(id));
    recording.log(
        format!("footprints/{}", id),
        &rerun::LineStrips2D::new([strip])
            .with_colors([id_to_color(id)])
            .with_labels([id.to_string()]),
    )?;
    recording.log(
        "camera",
        &rerun::Points2D::new([display_offset(anchor, footprint.origin)])
            .with_radii([rerun::Radius::new_ui_points(3.0)]),
    )?;
    Ok(())
}
