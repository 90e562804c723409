// Per-frame metric extraction
// Maps every tracking frame to one chartable metrics record

use serde::{Deserialize, Serialize};

use super::angles::limb_angle;
use crate::capture::{Frame, Trial};

/// Derived metrics for one tracking frame.
///
/// Absent values (untracked keypoints or ball, coincident limb keypoints)
/// serialize as `null`, which the charts render as gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMetrics {
    pub frame: u32,
    pub time: f64,
    pub r_elbow_deg: Option<f64>,
    pub l_elbow_deg: Option<f64>,
    pub r_knee_deg: Option<f64>,
    pub ball_x: Option<f64>,
    pub ball_y: Option<f64>,
    pub ball_z: Option<f64>,
}

/// One tracked ball position for the 3D trajectory chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallSample {
    pub frame: u32,
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Compute metrics for every frame of the trial, in capture order.
///
/// This is a 1:1 map: the output always has exactly one record per tracking
/// frame, untracked frames included.
pub fn extract_metrics(trial: &Trial) -> Vec<FrameMetrics> {
    trial.tracking.iter().map(frame_metrics).collect()
}

fn frame_metrics(frame: &Frame) -> FrameMetrics {
    let p = &frame.player;
    FrameMetrics {
        frame: frame.frame,
        time: frame.time,
        r_elbow_deg: limb_angle(p.r_shoulder, p.r_elbow, p.r_wrist),
        l_elbow_deg: limb_angle(p.l_shoulder, p.l_elbow, p.l_wrist),
        r_knee_deg: limb_angle(p.r_hip, p.r_knee, p.r_ankle),
        ball_x: frame.ball.map(|b| b.x),
        ball_y: frame.ball.map(|b| b.y),
        ball_z: frame.ball.map(|b| b.z),
    }
}

/// The frames where the ball was tracked, in capture order.
pub fn frames_with_ball(trial: &Trial) -> Vec<&Frame> {
    trial.tracking.iter().filter(|f| f.ball_tracked()).collect()
}

/// Ball positions for the 3D trajectory chart: tracked frames only, so the
/// drawn path has no holes.
pub fn ball_path(trial: &Trial) -> Vec<BallSample> {
    trial
        .tracking
        .iter()
        .filter_map(|frame| {
            frame.ball.map(|ball| BallSample {
                frame: frame.frame,
                time: frame.time,
                x: ball.x,
                y: ball.y,
                z: ball.z,
            })
        })
        .collect()
}
