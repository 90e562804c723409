// Metrics engine
// Joint angles, ball tracking filters, and per-frame metric extraction

pub mod angles;
pub mod extract;
pub mod summary;

pub use angles::{joint_angle, limb_angle};
pub use extract::{ball_path, extract_metrics, frames_with_ball, BallSample, FrameMetrics};
pub use summary::{shot_summary, ShotSummary};
