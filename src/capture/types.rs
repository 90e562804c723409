// Typed trial model
// Records for one free throw trial and its motion capture frames

use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of one trial: participant directory plus trial file stem,
/// rendered as `P0001/BB_FT_P0001_T0001`.
///
/// Both components are validated so an identifier can never escape the data
/// root when it is joined into a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrialId {
    participant: String,
    trial: String,
}

#[derive(Debug, Error)]
#[error("Invalid trial id {0:?}: expected <participant>/<trial> plain path components")]
pub struct InvalidTrialId(pub String);

impl TrialId {
    pub fn new(participant: &str, trial: &str) -> Result<Self, InvalidTrialId> {
        if !component_ok(participant) || !component_ok(trial) {
            return Err(InvalidTrialId(format!("{participant}/{trial}")));
        }
        Ok(TrialId {
            participant: participant.to_string(),
            trial: trial.to_string(),
        })
    }

    pub fn participant(&self) -> &str {
        &self.participant
    }

    pub fn trial(&self) -> &str {
        &self.trial
    }
}

/// A single non-hidden path component: no separators, no `.`/`..`.
fn component_ok(s: &str) -> bool {
    !s.is_empty() && !s.starts_with('.') && !s.contains(['/', '\\'])
}

impl fmt::Display for TrialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.participant, self.trial)
    }
}

impl FromStr for TrialId {
    type Err = InvalidTrialId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((participant, trial)) => TrialId::new(participant, trial),
            None => Err(InvalidTrialId(s.to_string())),
        }
    }
}

impl Serialize for TrialId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TrialId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One position in the capture volume, in capture-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length of the vector from the origin.
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

/// Outcome of a free throw attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Made,
    Missed,
}

impl ShotResult {
    /// Parse a result label from a trial file. Labels are matched
    /// case-insensitively; anything outside the vocabulary is rejected.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "made" => Some(ShotResult::Made),
            "missed" => Some(ShotResult::Missed),
            _ => None,
        }
    }

    pub fn is_made(self) -> bool {
        matches!(self, ShotResult::Made)
    }
}

/// Player joint keypoints for one frame.
///
/// Every keypoint the capture pipeline emits has a field here; a `None`
/// means that point was not tracked in this frame. The left/right prefix
/// follows the capture naming (`L_SHOULDER`, `R_WRIST`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerKeypoints {
    pub l_shoulder: Option<Point3>,
    pub r_shoulder: Option<Point3>,
    pub l_elbow: Option<Point3>,
    pub r_elbow: Option<Point3>,
    pub l_wrist: Option<Point3>,
    pub r_wrist: Option<Point3>,
    pub l_hip: Option<Point3>,
    pub r_hip: Option<Point3>,
    pub l_knee: Option<Point3>,
    pub r_knee: Option<Point3>,
    pub l_ankle: Option<Point3>,
    pub r_ankle: Option<Point3>,
}

/// One sampled instant of a trial.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Capture frame index, strictly increasing within a trial.
    pub frame: u32,
    /// Capture timestamp in seconds, non-decreasing within a trial.
    pub time: f64,
    pub player: PlayerKeypoints,
    /// Ball centre, or `None` while the ball is not detected.
    pub ball: Option<Point3>,
}

impl Frame {
    pub fn ball_tracked(&self) -> bool {
        self.ball.is_some()
    }
}

/// One loaded free throw trial. Immutable after loading; `tracking` keeps
/// the frame order of the source file.
#[derive(Debug, Clone)]
pub struct Trial {
    pub id: TrialId,
    pub result: ShotResult,
    /// Ball entry angle at the rim, degrees above horizontal.
    pub entry_angle_deg: f64,
    /// Landing position of the ball in court coordinates.
    pub landing_x: f64,
    pub landing_y: f64,
    pub tracking: Vec<Frame>,
}
