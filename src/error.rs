use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning camera frames into overlays.
///
/// Per-record variants end up as batch diagnostics; only [`Error::AggregateWrite`]
/// is expected to stop a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed pose input from {input}: {reason}")]
    MalformedPose { input: String, reason: String },

    #[error("latitude {latitude} is outside the projectable range (-90, 90)")]
    UndefinedProjection { latitude: f64 },

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("no comment block in {0}")]
    MissingComment(PathBuf),

    #[error("{path} is not a JPEG stream: {reason}")]
    InvalidImage { path: PathBuf, reason: String },

    #[error("cannot derive a frame id from {0}")]
    InvalidFrameId(PathBuf),

    #[error("invalid camera rig: {0}")]
    InvalidRig(String),

    #[error("cannot write {path}: {source}")]
    AggregateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Glob(#[from] glob::PatternError),
}

pub type Result<T> = std::result::Result<T, Error>;
