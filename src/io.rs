use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::batch::{Diagnostic, OverlayBatch};
use crate::error::{Error, Result};
use crate::kml;
use crate::rig::CameraRig;

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::AggregateWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize>(output_path: &Path, object: &T) -> Result<()> {
    let j = serde_json::to_string_pretty(object)?;
    write_file(output_path, &j)
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(file_path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// `<base>.kml` and `<base>.json`.
pub fn output_paths(base: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{}.kml", base)),
        PathBuf::from(format!("{}.json", base)),
    )
}

/// Writes the KML document and the JSON archive of a finished batch.
pub fn write_outputs(base: &str, batch: &OverlayBatch) -> Result<(PathBuf, PathBuf)> {
    let (kml_path, json_path) = output_paths(base);
    write_file(&kml_path, &kml::document(batch.overlays()))?;
    object_to_json(&json_path, batch.archive())?;
    log::info!(
        "wrote {} overlays to {} and {}",
        batch.accepted(),
        kml_path.display(),
        json_path.display()
    );
    Ok((kml_path, json_path))
}

#[derive(Serialize)]
struct RunReport<'a> {
    timestamp: String,
    rig: &'a CameraRig,
    processed: usize,
    skipped: usize,
    diagnostics: &'a [Diagnostic],
}

fn timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Writes a summary of the run: rig, counts and per-frame diagnostics.
pub fn write_report(output_path: &Path, batch: &OverlayBatch) -> Result<()> {
    let report = RunReport {
        timestamp: timestamp(),
        rig: batch.rig(),
        processed: batch.accepted(),
        skipped: batch.diagnostics().len(),
        diagnostics: batch.diagnostics(),
    };
    object_to_json(output_path, &report)
}
