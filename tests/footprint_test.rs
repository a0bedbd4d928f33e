use std::path::PathBuf;

use transect_overlay::footprint::{
    attitude_offsets, axis_aligned_box, compute_footprint, footprint_dimensions, offset_radius,
    rotated_edges, slant_distance,
};
use transect_overlay::overlay::overlay_rotation;
use transect_overlay::pose::PoseRecord;
use transect_overlay::rig::CameraRig;
use transect_overlay::types::PlanarPoint;

fn pose(altitude: f64, roll: f64, pitch: f64, heading: f64) -> PoseRecord {
    PoseRecord {
        id: 1,
        latitude: 0.0,
        longitude: 0.0,
        altitude,
        roll,
        pitch,
        heading,
        source: PathBuf::from("frame000001.jpg"),
    }
}

#[test]
fn test_reference_scenario() {
    let rig = CameraRig::default();
    let fp = compute_footprint(&pose(10.0, 0.0, 0.0, 0.0), &rig);

    assert_eq!(fp.distance_to_center, 10.0);
    let width = 2.0 * 27f64.to_radians().tan() * 10.0;
    assert!((fp.dimensions.width - width).abs() < 1e-12);
    assert!((fp.dimensions.width - 10.19).abs() < 0.01);
    assert!((fp.dimensions.height - width * 600.0 / 800.0).abs() < 1e-12);
    assert!((fp.dimensions.height - 7.64).abs() < 0.01);
    assert!((fp.center_offset.x - 1.3).abs() < 1e-12);
    assert!(fp.center_offset.y.abs() < 1e-12);
    assert!(fp.lat_lon_box.north > 0.0);
    assert!(fp.lat_lon_box.south < 0.0);
}

#[test]
fn test_zero_attitude_distance_is_altitude() {
    let rig = CameraRig::default();
    for altitude in [0.5, 3.0, 10.0, 123.456] {
        let fp = compute_footprint(&pose(altitude, 0.0, 0.0, 217.0), &rig);
        assert_eq!(fp.distance_to_center, altitude);
    }
}

#[test]
fn test_heading_zero_orientation() {
    let rig = CameraRig::default();
    let fp = compute_footprint(&pose(10.0, 0.0, 0.0, 0.0), &rig);
    let e = &fp.rotated_coordinates;
    assert!(e.top.lat > e.bottom.lat);
    assert!(e.left.lon < e.right.lon);
}

#[test]
fn test_attitude_pushes_center() {
    let (r, p) = attitude_offsets(10.0, 45.0, 0.0);
    assert!((r - 10.0).abs() < 1e-9);
    assert!(p.abs() < 1e-12);

    let radius = offset_radius(3.0, 4.0);
    assert!((radius - 5.0).abs() < 1e-12);
    assert!((slant_distance(radius, 12.0) - 13.0).abs() < 1e-12);

    let rig = CameraRig {
        offset_x: 0.0,
        ..CameraRig::default()
    };
    let fp = compute_footprint(&pose(10.0, 0.0, 45.0, 0.0), &rig);
    // heading zero displaces along -y in the rig frame
    assert!(fp.center_offset.x.abs() < 1e-9);
    assert!((fp.center_offset.y + 10.0).abs() < 1e-9);
    assert!((fp.distance_to_center - 200f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_heading_ninety_rotates_center() {
    let rig = CameraRig {
        offset_x: 0.0,
        ..CameraRig::default()
    };
    let fp = compute_footprint(&pose(10.0, 45.0, 0.0, 90.0), &rig);
    assert!((fp.center_offset.x - 10.0).abs() < 1e-9);
    assert!(fp.center_offset.y.abs() < 1e-9);
}

#[test]
fn test_edges_use_height_for_top_bottom() {
    let rig = CameraRig::default();
    let dims = footprint_dimensions(&rig, 10.0);
    let center = PlanarPoint::new(2.0, -1.0);
    let edges = rotated_edges(center, dims, 0.0);

    assert!((edges.top.distance(center) - dims.height / 2.0).abs() < 1e-12);
    assert!((edges.bottom.distance(center) - dims.height / 2.0).abs() < 1e-12);
    assert!((edges.left.distance(center) - dims.width / 2.0).abs() < 1e-12);
    assert!((edges.right.distance(center) - dims.width / 2.0).abs() < 1e-12);
    assert!((edges.top.y - (center.y - dims.height / 2.0)).abs() < 1e-12);
    assert!((edges.left.x - (center.x + dims.width / 2.0)).abs() < 1e-12);
}

#[test]
fn test_axis_aligned_box_ignores_heading() {
    let rig = CameraRig::default();
    let a = compute_footprint(&pose(10.0, 0.0, 0.0, 0.0), &rig);
    let b = compute_footprint(&pose(10.0, 0.0, 0.0, 120.0), &rig);
    assert_eq!(a.axis_aligned_box, b.axis_aligned_box);
    assert_eq!(
        a.axis_aligned_box,
        axis_aligned_box(a.center_offset, a.dimensions)
    );
    assert!(a.lat_lon_box.east > a.lat_lon_box.west);
}

#[test]
fn test_rotation_stays_in_range() {
    let mut heading = 0.0;
    while heading < 360.0 {
        let r = overlay_rotation(heading);
        assert!((-180.0..=180.0).contains(&r), "heading {} -> {}", heading, r);
        heading += 0.25;
    }
    assert_eq!(overlay_rotation(0.0), 0.0);
    assert_eq!(overlay_rotation(90.0), -90.0);
    assert_eq!(overlay_rotation(180.0), -180.0);
    assert_eq!(overlay_rotation(270.0), 90.0);
}

#[test]
fn test_footprints_keep_their_own_origin() {
    let rig = CameraRig::default();
    let mut p = pose(5.0, 2.0, -3.0, 45.0);
    p.latitude = 45.5;
    p.longitude = -70.25;
    let fp = compute_footprint(&p, &rig);
    assert_eq!(fp.origin.lat, 45.5);
    assert!((fp.rotated_coordinates.top.lat - 45.5).abs() < 1e-3);
    assert!((fp.rotated_coordinates.top.lon + 70.25).abs() < 1e-3);
}

#[test]
fn test_heading_ninety_turns_quad_west() {
    let rig = CameraRig {
        offset_x: 0.0,
        ..CameraRig::default()
    };
    let fp = compute_footprint(&pose(10.0, 0.0, 0.0, 90.0), &rig);
    let e = &fp.rotated_coordinates;
    assert!(e.top.lon < fp.origin.lon);
    assert!(e.bottom.lon > fp.origin.lon);
    assert!((e.top.lat - fp.origin.lat).abs() < 1e-9);
    assert_eq!(overlay_rotation(90.0), -90.0);
}
