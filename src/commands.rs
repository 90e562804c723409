// Tauri IPC Commands
use serde::Serialize;
use tauri::State;

use crate::capture::{Trial, TrialId, TrialStore};
use crate::metrics::{self, BallSample, FrameMetrics, ShotSummary};

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

/// Parse an identifier and load its trial fresh from disk.
fn load_trial(store: &TrialStore, trial: &str) -> CommandResult<Trial> {
    let id: TrialId = trial.parse()?;
    store.load(&id).map_err(|e| {
        log::warn!("Failed to load trial {}: {}", id, e);
        CommandError::from(e)
    })
}

// ==================== CATALOG COMMANDS ====================

/// Every trial discovered at startup, in catalog order.
#[tauri::command]
pub fn list_trials(store: State<'_, TrialStore>) -> CommandResult<Vec<String>> {
    Ok(store.trials().iter().map(|id| id.to_string()).collect())
}

// ==================== TRIAL COMMANDS ====================

#[derive(Debug, Serialize)]
pub struct TrialMetrics {
    pub trial: TrialId,
    pub frames: Vec<FrameMetrics>,
}

/// Header panel numbers for one trial.
#[tauri::command]
pub async fn get_shot_summary(
    store: State<'_, TrialStore>,
    trial: String,
) -> CommandResult<ShotSummary> {
    let record = load_trial(&store, &trial)?;
    Ok(metrics::shot_summary(&record))
}

/// Per-frame joint angles and ball coordinates for the 2D charts.
#[tauri::command]
pub async fn get_trial_metrics(
    store: State<'_, TrialStore>,
    trial: String,
) -> CommandResult<TrialMetrics> {
    let record = load_trial(&store, &trial)?;
    let frames = metrics::extract_metrics(&record);

    log::info!("Extracted metrics for {}: {} frames", record.id, frames.len());

    Ok(TrialMetrics {
        trial: record.id,
        frames,
    })
}

/// Tracked ball positions for the 3D trajectory chart.
#[tauri::command]
pub async fn get_ball_path(
    store: State<'_, TrialStore>,
    trial: String,
) -> CommandResult<Vec<BallSample>> {
    let record = load_trial(&store, &trial)?;
    Ok(metrics::ball_path(&record))
}
