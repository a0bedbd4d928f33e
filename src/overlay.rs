use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::footprint::{GroundFootprint, LatLonBox};
use crate::pose::{PoseRecord, RawPose};
use crate::types::{Edges, GeoCoord};

/// Heading remapped to the signed, counter-clockwise rotation KML expects.
pub fn overlay_rotation(heading: f64) -> f64 {
    if heading <= 180.0 {
        -heading
    } else {
        360.0 - heading
    }
}

/// Rotated quadrilateral through the four edge midpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatedFootprint {
    #[serde(flatten)]
    pub edges: Edges<GeoCoord>,
    pub heading: f64,
}

/// Axis-aligned approximation, paired with a rotation by renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnrotatedFootprint {
    #[serde(flatten)]
    pub bounds: LatLonBox,
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    pub rotated: RotatedFootprint,
    pub unrotated: UnrotatedFootprint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRecord {
    pub id: i64,
    pub draw_priority: u32,
    pub source: PathBuf,
    pub geometry: OverlayGeometry,
}

impl OverlayRecord {
    pub fn build(pose: &PoseRecord, footprint: &GroundFootprint, draw_priority: u32) -> OverlayRecord {
        OverlayRecord {
            id: pose.id,
            draw_priority,
            source: pose.source.clone(),
            geometry: OverlayGeometry {
                rotated: RotatedFootprint {
                    edges: footprint.rotated_coordinates,
                    heading: pose.heading,
                },
                unrotated: UnrotatedFootprint {
                    bounds: footprint.lat_lon_box,
                    heading: pose.heading,
                },
            },
        }
    }

    pub fn rotation(&self) -> f64 {
        overlay_rotation(self.geometry.unrotated.heading)
    }

    pub fn ground_overlay(&self) -> GroundOverlayEntry {
        GroundOverlayEntry {
            name: self.id.to_string(),
            draw_order: self.draw_priority,
            href: self.source.display().to_string(),
            bounds: self.geometry.unrotated.bounds,
            rotation: self.rotation(),
        }
    }
}

/// One `<GroundOverlay>` of the markup document.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundOverlayEntry {
    pub name: String,
    pub draw_order: u32,
    pub href: String,
    pub bounds: LatLonBox,
    pub rotation: f64,
}

/// Per-frame entry of the JSON archive: raw metadata plus the overlay geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub n: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    pub overlay: OverlayGeometry,
}

impl ArchiveRecord {
    /// `lat`/`lon` are replaced by the decoded `latitude`/`longitude`.
    pub fn new(raw: &RawPose, pose: &PoseRecord, record: &OverlayRecord) -> ArchiveRecord {
        let fields = raw
            .fields
            .iter()
            .filter(|(k, _)| k.as_str() != "lat" && k.as_str() != "lon")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        ArchiveRecord {
            n: pose.id,
            latitude: pose.latitude,
            longitude: pose.longitude,
            fields,
            overlay: record.geometry.clone(),
        }
    }
}
