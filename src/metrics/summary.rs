// Shot summary
// Header panel data for one trial

use serde::{Deserialize, Serialize};

use crate::capture::{ShotResult, Trial, TrialId};

/// Trial-level numbers shown in the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotSummary {
    pub trial: TrialId,
    pub result: ShotResult,
    pub entry_angle_deg: f64,
    pub landing_x: f64,
    pub landing_y: f64,
    /// Total tracking frames in the trial.
    pub frame_count: usize,
    /// Frames in which the ball was tracked.
    pub ball_frame_count: usize,
    /// Capture time span from first to last frame, seconds.
    pub duration_s: f64,
}

/// Summarize a loaded trial.
pub fn shot_summary(trial: &Trial) -> ShotSummary {
    let duration_s = match (trial.tracking.first(), trial.tracking.last()) {
        (Some(first), Some(last)) => last.time - first.time,
        _ => 0.0,
    };
    let ball_frame_count = trial.tracking.iter().filter(|f| f.ball_tracked()).count();

    ShotSummary {
        trial: trial.id.clone(),
        result: trial.result,
        entry_angle_deg: trial.entry_angle_deg,
        landing_x: trial.landing_x,
        landing_y: trial.landing_y,
        frame_count: trial.tracking.len(),
        ball_frame_count,
        duration_s,
    }
}
