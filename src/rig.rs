use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Camera mounting and optics, fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRig {
    /// Horizontal field of view in degrees.
    pub field_of_view: f64,
    pub image_width: u32,
    pub image_height: u32,
    /// Camera offset from the navigation reference point, meters.
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            field_of_view: 54.0,
            image_width: 800,
            image_height: 600,
            offset_x: 1.3,
            offset_y: 0.0,
        }
    }
}

impl CameraRig {
    /// Loads a rig from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: &str) -> Result<CameraRig> {
        let contents = std::fs::read_to_string(path)?;
        let rig: CameraRig = serde_json::from_str(&contents)?;
        rig.validate()?;
        Ok(rig)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return Err(Error::InvalidRig(format!(
                "field of view {} must be inside (0, 180) degrees",
                self.field_of_view
            )));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(Error::InvalidRig(format!(
                "image dimensions {}x{} must be positive",
                self.image_width, self.image_height
            )));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(Error::InvalidRig("camera offset must be finite".to_string()));
        }
        Ok(())
    }

    pub fn offset(&self) -> glam::DVec2 {
        glam::DVec2::new(self.offset_x, self.offset_y)
    }

    /// Height over width of the image.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_height as f64 / self.image_width as f64
    }

    pub fn field_of_view_rad(&self) -> f64 {
        self.field_of_view.to_radians()
    }
}
