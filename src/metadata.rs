//! Frame metadata stored as XML in the JPEG comment segment.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::pose::RawPose;

/// Leaf elements kept from the comment block; everything else is ignored.
pub const KNOWN_FIELDS: [&str; 20] = [
    "entrytime",
    "lat",
    "lon",
    "altitude",
    "depth",
    "heading",
    "pitch",
    "roll",
    "surge",
    "capture_time",
    "filename",
    "brightness",
    "exposure",
    "gain",
    "gamma",
    "shutter",
    "white_balance_bu",
    "white_balance_rv",
    "jpeg_quality",
    "thread_id",
];

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const COM: u8 = 0xFE;
const MAX_SEGMENT_PAYLOAD: usize = u16::MAX as usize - 2;

static LEAF_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([A-Za-z_][\w.\-]*)(?:\s[^>]*)?>([^<]*)</([A-Za-z_][\w.\-]*)\s*>")
        .expect("leaf element pattern is valid")
});

/// Concatenated COM segment payloads of a JPEG stream, or `None` if there are none.
///
/// Scanning stops at the first start-of-scan marker.
pub fn jpeg_comment(bytes: &[u8]) -> std::result::Result<Option<String>, String> {
    if bytes.len() < 2 || bytes[0] != 0xFF || bytes[1] != SOI {
        return Err("missing start-of-image marker".to_string());
    }
    let mut comment: Option<Vec<u8>> = None;
    let mut i = 2;
    while i + 1 < bytes.len() {
        if bytes[i] != 0xFF {
            return Err(format!("expected a marker at byte {}", i));
        }
        let mut marker = bytes[i + 1];
        while marker == 0xFF && i + 2 < bytes.len() {
            i += 1;
            marker = bytes[i + 1];
        }
        match marker {
            SOS | EOI => break,
            0x01 | 0xD0..=0xD7 => {
                i += 2;
                continue;
            }
            _ => {}
        }
        if i + 4 > bytes.len() {
            return Err(format!("truncated segment header at byte {}", i));
        }
        let len = u16::from_be_bytes([bytes[i + 2], bytes[i + 3]]) as usize;
        if len < 2 || i + 2 + len > bytes.len() {
            return Err(format!("segment at byte {} runs past the end of the file", i));
        }
        if marker == COM {
            comment
                .get_or_insert_with(Vec::new)
                .extend_from_slice(&bytes[i + 4..i + 2 + len]);
        }
        i += 2 + len;
    }
    Ok(comment.map(|c| String::from_utf8_lossy(&c).into_owned()))
}

/// Returns `jpeg` with a COM segment carrying `comment` right after SOI.
///
/// Comments longer than one segment are split across several.
pub fn insert_comment(jpeg: &[u8], comment: &str) -> Vec<u8> {
    let body = jpeg.get(2..).unwrap_or(&[]);
    let mut out = Vec::with_capacity(jpeg.len() + comment.len() + 8);
    out.extend_from_slice(&[0xFF, SOI]);
    for chunk in comment.as_bytes().chunks(MAX_SEGMENT_PAYLOAD) {
        out.extend_from_slice(&[0xFF, COM]);
        out.extend_from_slice(&((chunk.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(chunk);
    }
    out.extend_from_slice(body);
    out
}

/// Known leaf fields of an XML comment, text trimmed.
pub fn extract_fields(comment: &str) -> BTreeMap<String, String> {
    let comment = comment.replace("white-balance", "white_balance");
    LEAF_ELEMENT
        .captures_iter(&comment)
        .filter(|c| c[1] == c[3])
        .filter(|c| KNOWN_FIELDS.contains(&&c[1]))
        .map(|c| (c[1].to_string(), c[2].trim().to_string()))
        .collect()
}

/// Frame index from a file name such as `frame000042_cam0.jpg`.
pub fn frame_id(path: &Path) -> Result<i64> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InvalidFrameId(path.to_path_buf()))?;
    let stem = stem.strip_prefix("frame").unwrap_or(stem);
    stem.split('_')
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| Error::InvalidFrameId(path.to_path_buf()))
}

/// Reads one frame from disk into raw pose fields.
pub fn load_raw_pose(path: &Path) -> Result<RawPose> {
    let id = frame_id(path)?;
    let bytes = std::fs::read(path).map_err(|e| Error::MalformedPose {
        input: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let comment = jpeg_comment(&bytes)
        .map_err(|reason| Error::InvalidImage {
            path: path.to_path_buf(),
            reason,
        })?
        .ok_or_else(|| Error::MissingComment(path.to_path_buf()))?;
    let fields = extract_fields(&comment);
    if fields.is_empty() {
        return Err(Error::MalformedPose {
            input: path.display().to_string(),
            reason: "comment block holds no recognised fields".to_string(),
        });
    }
    let source = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    Ok(RawPose { id, source, fields })
}
