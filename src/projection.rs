//! Spherical Mercator (EPSG:900913) conversions.
//!
//! Planar coordinates handed back to [`to_geodetic`] are offsets from an origin,
//! not absolute plane coordinates.

use std::f64::consts::PI;

use crate::types::{GeoCoord, PlanarPoint};

/// WGS84 semi-major axis in meters.
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the equatorial circumference.
const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS;

/// Geodetic degrees to global Mercator meters.
///
/// Latitude must lie strictly inside (-90, 90); the log term diverges at the poles.
pub fn to_planar(lat: f64, lon: f64) -> PlanarPoint {
    let mx = lon * ORIGIN_SHIFT / 180.0;
    let my = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    PlanarPoint::new(mx, my * ORIGIN_SHIFT / 180.0)
}

/// Mercator offset in meters from `origin` back to geodetic degrees.
pub fn to_geodetic(origin: GeoCoord, offset: PlanarPoint) -> GeoCoord {
    let absolute = to_planar(origin.lat, origin.lon) + offset;

    let lon = absolute.x / ORIGIN_SHIFT * 180.0;
    let lat = absolute.y / ORIGIN_SHIFT * 180.0;
    let lat = 180.0 / PI * (2.0 * (lat * PI / 180.0).exp().atan() - PI / 2.0);
    GeoCoord::new(lat, lon)
}
