//! Ground footprint of a single frame.
//!
//! All intermediate offsets live in the rig frame, in meters from the navigation
//! reference point. Heading rotates a vector by `(sin h, -cos h)`, so a zero
//! heading points along -y. The rig frame is the map plane turned half a
//! revolution: image top is -y, image left is +x.
//!
//! Because of that half turn the geodetic quad turns counter-clockwise as
//! heading grows (heading 90 puts the top edge west of the camera), while the
//! KML rotation of the axis-aligned box turns clockwise. Rig +x always maps
//! west and rig +y south, whatever the heading.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::pose::PoseRecord;
use crate::projection::to_geodetic;
use crate::rig::CameraRig;
use crate::types::{Edges, GeoCoord, PlanarPoint};

/// Footprint size on the ground, meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Heading-free rectangle around the footprint center, meters in the rig frame.
///
/// `top`/`bottom` bound the x axis, `left`/`right` bound the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Geodetic bounds of an [`AxisAlignedBox`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundFootprint {
    /// Geodetic position of the navigation reference point.
    pub origin: GeoCoord,
    pub center_offset: PlanarPoint,
    /// Slant range from the camera to the footprint center.
    pub distance_to_center: f64,
    pub dimensions: Dimensions,
    pub rotated_edges: Edges<PlanarPoint>,
    pub axis_aligned_box: AxisAlignedBox,
    pub rotated_coordinates: Edges<GeoCoord>,
    pub lat_lon_box: LatLonBox,
}

/// Horizontal displacement of the footprint center caused by roll and pitch.
///
/// Altitude is the lever arm for both angles.
pub fn attitude_offsets(altitude: f64, roll_deg: f64, pitch_deg: f64) -> (f64, f64) {
    let roll_offset = roll_deg.to_radians().tan() * altitude;
    let pitch_offset = pitch_deg.to_radians().tan() * altitude;
    (roll_offset, pitch_offset)
}

pub fn offset_radius(roll_offset: f64, pitch_offset: f64) -> f64 {
    roll_offset.hypot(pitch_offset)
}

pub fn slant_distance(radius_of_offset: f64, altitude: f64) -> f64 {
    radius_of_offset.hypot(altitude)
}

/// Unit vector for `heading_rad` in the rig frame.
pub fn heading_direction(heading_rad: f64) -> PlanarPoint {
    PlanarPoint::new(heading_rad.sin(), -heading_rad.cos())
}

pub fn center_offset(rig: &CameraRig, radius_of_offset: f64, heading_rad: f64) -> PlanarPoint {
    rig.offset() + radius_of_offset * heading_direction(heading_rad)
}

pub fn footprint_dimensions(rig: &CameraRig, distance_to_center: f64) -> Dimensions {
    let width = 2.0 * (rig.field_of_view_rad() / 2.0).tan() * distance_to_center;
    let height = width * rig.aspect_ratio();
    Dimensions { width, height }
}

/// Edge midpoints after heading rotation.
///
/// Top and bottom sit half a height from the center along the camera's forward
/// axis; left and right sit half a width across it.
pub fn rotated_edges(center: PlanarPoint, dims: Dimensions, heading_rad: f64) -> Edges<PlanarPoint> {
    use std::f64::consts::{FRAC_PI_2, PI};

    let half_h = dims.height / 2.0;
    let half_w = dims.width / 2.0;
    Edges {
        top: center + half_h * heading_direction(heading_rad),
        bottom: center + half_h * heading_direction(heading_rad + PI),
        left: center + half_w * heading_direction(heading_rad + FRAC_PI_2),
        right: center + half_w * heading_direction(heading_rad - FRAC_PI_2),
    }
}

pub fn axis_aligned_box(center: PlanarPoint, dims: Dimensions) -> AxisAlignedBox {
    AxisAlignedBox {
        top: center.x - dims.width / 2.0,
        bottom: center.x + dims.width / 2.0,
        left: center.y + dims.height / 2.0,
        right: center.y - dims.height / 2.0,
    }
}

/// Rig-frame offset to geodetic, relative to `origin`.
pub fn rig_offset_to_geodetic(origin: GeoCoord, offset: PlanarPoint) -> GeoCoord {
    to_geodetic(origin, -offset)
}

pub fn lat_lon_box(origin: GeoCoord, aab: &AxisAlignedBox) -> LatLonBox {
    let a = rig_offset_to_geodetic(origin, PlanarPoint::new(aab.top, aab.left));
    let b = rig_offset_to_geodetic(origin, PlanarPoint::new(aab.bottom, aab.right));
    LatLonBox {
        north: a.lat.max(b.lat),
        south: a.lat.min(b.lat),
        east: a.lon.max(b.lon),
        west: a.lon.min(b.lon),
    }
}

/// Runs the whole pipeline for one pose.
///
/// The caller guarantees the pose latitude is inside (-90, 90).
pub fn compute_footprint(pose: &PoseRecord, rig: &CameraRig) -> GroundFootprint {
    let heading_rad = pose.heading.to_radians();
    let (roll_offset, pitch_offset) = attitude_offsets(pose.altitude, pose.roll, pose.pitch);
    let radius = offset_radius(roll_offset, pitch_offset);
    let distance_to_center = slant_distance(radius, pose.altitude);
    let center = center_offset(rig, radius, heading_rad);
    let dimensions = footprint_dimensions(rig, distance_to_center);
    let rotated_edges = rotated_edges(center, dimensions, heading_rad);

    let origin = pose.position();
    let rotated_coordinates = rotated_edges.map(|p| rig_offset_to_geodetic(origin, p));
    let axis_aligned_box = axis_aligned_box(center, dimensions);
    let lat_lon_box = lat_lon_box(origin, &axis_aligned_box);
    trace!(
        "frame {}: center ({:.3}, {:.3}) m, {:.3} x {:.3} m at {:.3} m",
        pose.id, center.x, center.y, dimensions.width, dimensions.height, distance_to_center
    );

    GroundFootprint {
        origin,
        center_offset: center,
        distance_to_center,
        dimensions,
        rotated_edges,
        axis_aligned_box,
        rotated_coordinates,
        lat_lon_box,
    }
}
