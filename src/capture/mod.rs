// Motion capture module
// Trial discovery, loading, and the typed trial model

pub mod catalog;
pub mod loader;
pub mod types;

pub use catalog::{default_data_root, scan_trials, CatalogError, TrialStore};
pub use loader::{load_trial, parse_trial, trial_path, LoadError};
pub use types::{Frame, PlayerKeypoints, Point3, ShotResult, Trial, TrialId};
