use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::footprint::{GroundFootprint, compute_footprint};
use crate::overlay::{ArchiveRecord, GroundOverlayEntry, OverlayRecord};
use crate::pose::{PoseRecord, RawPose};
use crate::rig::CameraRig;

/// Draw order cycle so overlapping frames are not always stacked the same way.
///
/// Yields 100, 99, 99, 100, 99, 99, ...
#[derive(Debug, Clone, Default)]
pub struct DrawPriority {
    index: usize,
}

impl DrawPriority {
    pub const HIGH: u32 = 100;
    pub const LOW: u32 = 99;

    pub fn new() -> DrawPriority {
        DrawPriority::default()
    }
}

impl Iterator for DrawPriority {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let priority = if self.index % 3 == 0 {
            Self::HIGH
        } else {
            Self::LOW
        };
        self.index += 1;
        Some(priority)
    }
}

/// Why a frame was left out of the outputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub source: PathBuf,
    pub id: Option<i64>,
    pub reason: String,
}

/// Accumulates overlay entries and archive records across a run.
pub struct OverlayBatch {
    rig: CameraRig,
    priorities: DrawPriority,
    overlays: Vec<GroundOverlayEntry>,
    archive: BTreeMap<i64, ArchiveRecord>,
    diagnostics: Vec<Diagnostic>,
}

impl OverlayBatch {
    pub fn new(rig: CameraRig) -> OverlayBatch {
        OverlayBatch {
            rig,
            priorities: DrawPriority::new(),
            overlays: Vec::new(),
            archive: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Adds one loaded frame, or records why it could not be used.
    ///
    /// Returns the footprint of an accepted frame.
    pub fn ingest(&mut self, loaded: Result<RawPose>) -> Option<GroundFootprint> {
        let raw = match loaded {
            Ok(raw) => raw,
            Err(e) => {
                self.reject(source_of(&e), None, e.to_string());
                return None;
            }
        };
        match PoseRecord::from_raw(&raw) {
            Ok(pose) => Some(self.accept(&raw, &pose)),
            Err(e) => {
                let e = Error::MalformedPose {
                    input: raw.source.display().to_string(),
                    reason: e.to_string(),
                };
                self.reject(raw.source.clone(), Some(raw.id), e.to_string());
                None
            }
        }
    }

    fn accept(&mut self, raw: &RawPose, pose: &PoseRecord) -> GroundFootprint {
        let footprint = compute_footprint(pose, &self.rig);
        let draw_priority = self.priorities.next().unwrap_or(DrawPriority::HIGH);
        let record = OverlayRecord::build(pose, &footprint, draw_priority);
        debug!("frame {} accepted with draw order {}", pose.id, draw_priority);

        self.overlays.push(record.ground_overlay());
        let archived = ArchiveRecord::new(raw, pose, &record);
        if self.archive.insert(pose.id, archived).is_some() {
            warn!(
                "frame id {} appears more than once, keeping {}",
                pose.id,
                pose.source.display()
            );
        }
        footprint
    }

    fn reject(&mut self, source: PathBuf, id: Option<i64>, reason: String) {
        warn!("skipping {}: {}", source.display(), reason);
        self.diagnostics.push(Diagnostic { source, id, reason });
    }

    pub fn overlays(&self) -> &[GroundOverlayEntry] {
        &self.overlays
    }

    pub fn archive(&self) -> &BTreeMap<i64, ArchiveRecord> {
        &self.archive
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn accepted(&self) -> usize {
        self.overlays.len()
    }
}

fn source_of(e: &Error) -> PathBuf {
    match e {
        Error::MissingComment(p) | Error::InvalidFrameId(p) => p.clone(),
        Error::InvalidImage { path, .. } => path.clone(),
        Error::MalformedPose { input, .. } => PathBuf::from(input),
        _ => PathBuf::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_period_is_three() {
        let seq: Vec<u32> = DrawPriority::new().take(7).collect();
        assert_eq!(seq, vec![100, 99, 99, 100, 99, 99, 100]);
    }
}
