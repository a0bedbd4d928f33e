use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::types::GeoCoord;

/// Text fields pulled out of one frame's metadata, not yet interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPose {
    pub id: i64,
    pub source: PathBuf,
    pub fields: BTreeMap<String, String>,
}

impl RawPose {
    pub fn new(id: i64, source: impl Into<PathBuf>) -> RawPose {
        RawPose {
            id,
            source: source.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: &str) -> RawPose {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }
}

/// Camera pose at capture time. Angles in degrees, altitude in meters above ground.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRecord {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub roll: f64,
    pub pitch: f64,
    /// Bearing, 0 = north, clockwise.
    pub heading: f64,
    pub source: PathBuf,
}

impl PoseRecord {
    /// Interprets the six pose fields of `raw`.
    ///
    /// Rejects missing or non-finite values and polar latitudes. Heading is
    /// wrapped into [0, 360).
    pub fn from_raw(raw: &RawPose) -> Result<PoseRecord> {
        let latitude = coordinate_field(raw, "lat")?;
        let longitude = coordinate_field(raw, "lon")?;
        let pose = PoseRecord {
            id: raw.id,
            latitude,
            longitude,
            altitude: number_field(raw, "altitude")?,
            roll: number_field(raw, "roll")?,
            pitch: number_field(raw, "pitch")?,
            heading: number_field(raw, "heading")?.rem_euclid(360.0),
            source: raw.source.clone(),
        };
        pose.check_projectable()?;
        Ok(pose)
    }

    pub fn position(&self) -> GeoCoord {
        GeoCoord::new(self.latitude, self.longitude)
    }

    pub fn check_projectable(&self) -> Result<()> {
        if self.latitude.abs() >= 90.0 {
            return Err(Error::UndefinedProjection {
                latitude: self.latitude,
            });
        }
        Ok(())
    }
}

fn field<'a>(raw: &'a RawPose, name: &'static str) -> Result<&'a str> {
    raw.fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField(name))
}

fn number_field(raw: &RawPose, name: &'static str) -> Result<f64> {
    let text = field(raw, name)?;
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            field: name,
            value: text.to_string(),
        })
}

fn coordinate_field(raw: &RawPose, name: &'static str) -> Result<f64> {
    let text = field(raw, name)?;
    parse_coordinate(text).ok_or_else(|| Error::InvalidNumber {
        field: name,
        value: text.to_string(),
    })
}

/// Parses a navigation-style coordinate into signed decimal degrees.
///
/// `"4530.25N"` is 45°30.25' north and `"12001.5W"` is 120°01.5' west.
/// Text without a hemisphere letter is taken as decimal degrees.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;
    let sign = match last.to_ascii_uppercase() {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => {
            return text.parse::<f64>().ok().filter(|v| v.is_finite());
        }
    };
    let number: f64 = text[..text.len() - last.len_utf8()].trim().parse().ok()?;
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    let degrees = (number / 100.0).trunc();
    let minutes = number - degrees * 100.0;
    Some((degrees + minutes / 60.0) * sign)
}

/// Formats decimal degrees as `ddmm.mmmmH` (latitude) or `dddmm.mmmmH` (longitude).
pub fn format_coordinate(degrees: f64, is_latitude: bool) -> String {
    let hemisphere = match (is_latitude, degrees < 0.0) {
        (true, false) => 'N',
        (true, true) => 'S',
        (false, false) => 'E',
        (false, true) => 'W',
    };
    let abs = degrees.abs();
    let mut whole = abs.trunc();
    let mut minutes = (abs - whole) * 60.0;
    if minutes >= 59.99995 {
        whole += 1.0;
        minutes = 0.0;
    }
    let width = if is_latitude { 2 } else { 3 };
    format!("{:0width$}{:07.4}{}", whole as u32, minutes, hemisphere, width = width)
}
