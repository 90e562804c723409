// Trial ingestion
// Reads trial JSON files and validates them into typed Trial records

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::types::{Frame, PlayerKeypoints, Point3, ShotResult, Trial, TrialId};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Trial not found: {0}")]
    NotFound(TrialId),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid trial JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema violation in {trial}: {detail}")]
    Schema { trial: TrialId, detail: String },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Resolve a trial identifier to its file under the data root.
pub fn trial_path(data_dir: &Path, id: &TrialId) -> PathBuf {
    data_dir
        .join(id.participant())
        .join(format!("{}.json", id.trial()))
}

/// Load one trial from disk. A missing file maps to `NotFound`; any other
/// read failure stays an IO error.
pub fn load_trial(data_dir: &Path, id: &TrialId) -> LoadResult<Trial> {
    let path = trial_path(data_dir, id);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound(id.clone()));
        }
        Err(err) => return Err(LoadError::Io(err)),
    };
    parse_trial(id.clone(), &raw)
}

/// Parse and validate one trial document.
pub fn parse_trial(id: TrialId, json: &str) -> LoadResult<Trial> {
    let sanitized = rewrite_non_finite(json);
    let raw: RawTrial = serde_json::from_str(&sanitized)?;

    let result = match ShotResult::parse(&raw.result) {
        Some(result) => result,
        None => {
            return Err(schema(id, format!("unknown result label {:?}", raw.result)));
        }
    };

    let mut tracking = Vec::with_capacity(raw.tracking.len());
    for raw_frame in raw.tracking {
        let frame_no = raw_frame.frame;
        let player = raw_frame
            .data
            .player
            .into_keypoints(frame_no)
            .map_err(|detail| schema(id.clone(), detail))?;
        let ball = raw_frame
            .data
            .ball
            .into_point("ball", frame_no)
            .map_err(|detail| schema(id.clone(), detail))?;
        tracking.push(Frame {
            frame: frame_no,
            time: raw_frame.time,
            player,
            ball,
        });
    }

    for pair in tracking.windows(2) {
        if pair[1].frame <= pair[0].frame {
            return Err(schema(
                id,
                format!(
                    "frame indices must be strictly increasing ({} follows {})",
                    pair[1].frame, pair[0].frame
                ),
            ));
        }
        if pair[1].time < pair[0].time {
            return Err(schema(
                id,
                format!(
                    "time went backwards at frame {} ({} follows {})",
                    pair[1].frame, pair[1].time, pair[0].time
                ),
            ));
        }
    }

    Ok(Trial {
        id,
        result,
        entry_angle_deg: raw.entry_angle,
        landing_x: raw.landing_x,
        landing_y: raw.landing_y,
        tracking,
    })
}

fn schema(trial: TrialId, detail: String) -> LoadError {
    LoadError::Schema { trial, detail }
}

/// Rewrite the non-standard number literals Python's `json` module emits
/// (`NaN`, `Infinity`, `-Infinity`) into `null`. serde_json enforces
/// RFC 8259, which has no such literals. String contents are left alone.
fn rewrite_non_finite(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 2,
                b'"' => {
                    in_string = false;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }
        if b == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        // Token matching is byte-wise: `i` may sit inside a multi-byte
        // character, so `input` is only ever sliced at token boundaries,
        // which are ASCII.
        let token_len = if bytes[i..].starts_with(b"NaN") {
            3
        } else if bytes[i..].starts_with(b"Infinity") {
            8
        } else if bytes[i..].starts_with(b"-Infinity") {
            9
        } else {
            0
        };
        if token_len > 0 {
            out.push_str(&input[copied..i]);
            out.push_str("null");
            i += token_len;
            copied = i;
        } else {
            i += 1;
        }
    }

    out.push_str(&input[copied..]);
    out
}

// Wire-format structs. Every key the capture pipeline writes is a required
// field, so a trial missing one fails at parse time instead of at point of
// use. Coordinates are nullable because `rewrite_non_finite` has already
// turned untracked (NaN) values into null.

#[derive(Debug, Deserialize)]
struct RawTrial {
    result: String,
    entry_angle: f64,
    landing_x: f64,
    landing_y: f64,
    tracking: Vec<RawFrame>,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    frame: u32,
    time: f64,
    data: RawFrameData,
}

#[derive(Debug, Deserialize)]
struct RawFrameData {
    player: RawKeypoints,
    ball: RawPoint,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawKeypoints {
    l_shoulder: RawPoint,
    r_shoulder: RawPoint,
    l_elbow: RawPoint,
    r_elbow: RawPoint,
    l_wrist: RawPoint,
    r_wrist: RawPoint,
    l_hip: RawPoint,
    r_hip: RawPoint,
    l_knee: RawPoint,
    r_knee: RawPoint,
    l_ankle: RawPoint,
    r_ankle: RawPoint,
}

/// An `[x, y, z]` triple as written by the capture pipeline.
#[derive(Debug, Deserialize)]
struct RawPoint([Option<f64>; 3]);

impl RawPoint {
    /// All-or-nothing conversion: a full triple is a point, an all-null
    /// triple is an untracked point, and a mix violates the capture
    /// contract.
    fn into_point(self, what: &str, frame: u32) -> Result<Option<Point3>, String> {
        let [x, y, z] = self.0;
        match (x, y, z) {
            (Some(x), Some(y), Some(z)) => Ok(Some(Point3::new(x, y, z))),
            (None, None, None) => Ok(None),
            _ => Err(format!("frame {frame}: {what} is partially tracked")),
        }
    }
}

impl RawKeypoints {
    fn into_keypoints(self, frame: u32) -> Result<PlayerKeypoints, String> {
        Ok(PlayerKeypoints {
            l_shoulder: self.l_shoulder.into_point("keypoint L_SHOULDER", frame)?,
            r_shoulder: self.r_shoulder.into_point("keypoint R_SHOULDER", frame)?,
            l_elbow: self.l_elbow.into_point("keypoint L_ELBOW", frame)?,
            r_elbow: self.r_elbow.into_point("keypoint R_ELBOW", frame)?,
            l_wrist: self.l_wrist.into_point("keypoint L_WRIST", frame)?,
            r_wrist: self.r_wrist.into_point("keypoint R_WRIST", frame)?,
            l_hip: self.l_hip.into_point("keypoint L_HIP", frame)?,
            r_hip: self.r_hip.into_point("keypoint R_HIP", frame)?,
            l_knee: self.l_knee.into_point("keypoint L_KNEE", frame)?,
            r_knee: self.r_knee.into_point("keypoint R_KNEE", frame)?,
            l_ankle: self.l_ankle.into_point("keypoint L_ANKLE", frame)?,
            r_ankle: self.r_ankle.into_point("keypoint R_ANKLE", frame)?,
        })
    }
}
