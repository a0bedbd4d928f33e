use std::path::{Path, PathBuf};

use glob::glob;
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::error::Result;
use crate::metadata::load_raw_pose;
use crate::pose::RawPose;

fn img_filter(rp: glob::GlobResult) -> Option<PathBuf> {
    match rp {
        Ok(p) => {
            let name = p.as_os_str().to_string_lossy().to_ascii_lowercase();
            for ext in &[".jpg", ".jpeg"] {
                if name.ends_with(ext) {
                    return Some(p);
                }
            }
            None
        }
        Err(e) => {
            log::warn!("unreadable directory entry: {}", e);
            None
        }
    }
}

/// JPEG frames directly inside `root_folder`, sorted by path.
pub fn discover_frames(root_folder: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root_folder.join("*");
    let img_paths = glob(&pattern.to_string_lossy())?;
    let mut sorted_path: Vec<PathBuf> = img_paths.filter_map(img_filter).collect();
    sorted_path.sort();
    log::trace!("found {} frames in {}", sorted_path.len(), root_folder.display());
    Ok(sorted_path)
}

/// Loads the metadata of every frame in parallel, keeping path order.
///
/// Unreadable frames come back as errors in their slot rather than failing the call.
pub fn load_transect(root_folder: &Path) -> Result<Vec<Result<RawPose>>> {
    let paths = discover_frames(root_folder)?;
    let loaded = paths
        .par_iter()
        .progress_count(paths.len() as u64)
        .map(|path| load_raw_pose(path))
        .collect();
    Ok(loaded)
}

/// Pixel dimensions of the first frame in `root_folder`, if any.
pub fn probe_dimensions(root_folder: &Path) -> Result<Option<(u32, u32)>> {
    match discover_frames(root_folder)?.first() {
        Some(path) => Ok(Some(image::image_dimensions(path)?)),
        None => Ok(None),
    }
}
