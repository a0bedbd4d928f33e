pub mod batch;
pub mod data_loader;
pub mod error;
pub mod footprint;
pub mod io;
pub mod kml;
pub mod metadata;
pub mod overlay;
pub mod pose;
pub mod projection;
pub mod rig;
pub mod types;
pub mod visualization;

pub use error::{Error, Result};
