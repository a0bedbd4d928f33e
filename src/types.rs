use serde::{Deserialize, Serialize};

/// Meters in a Mercator plane, always relative to some geodetic origin.
pub type PlanarPoint = glam::DVec2;

/// Latitude / longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lon: f64) -> GeoCoord {
        GeoCoord { lat, lon }
    }
}

/// The four edge midpoints of an image footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edges<T> {
    pub top: T,
    pub bottom: T,
    pub left: T,
    pub right: T,
}

impl<T> Edges<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Edges<U> {
        Edges {
            top: f(self.top),
            bottom: f(self.bottom),
            left: f(self.left),
            right: f(self.right),
        }
    }
}
