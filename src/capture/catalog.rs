// Trial catalog
// Discovers trial files in the participant/trial directory layout

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::loader::{self, LoadError};
use super::types::{Trial, TrialId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// List every trial under `data_dir`, sorted by participant then trial.
///
/// The data root holds one directory per participant, each containing one
/// JSON file per trial. Stray files at the top level, non-JSON files inside
/// participant directories, and names that do not form a valid identifier
/// are skipped.
pub fn scan_trials(data_dir: &Path) -> CatalogResult<Vec<TrialId>> {
    let mut trials = Vec::new();

    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let dir_path = entry.path();
        if !dir_path.is_dir() {
            continue;
        }
        let participant = match dir_path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };

        for file in fs::read_dir(&dir_path)? {
            let file_path = file?.path();
            if !file_path.is_file() {
                continue;
            }
            if file_path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = match file_path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            match TrialId::new(&participant, stem) {
                Ok(id) => trials.push(id),
                Err(err) => log::debug!("Skipping unusable trial file: {}", err),
            }
        }
    }

    trials.sort();
    Ok(trials)
}

/// Resolve the data root for this session: the `SWISH_DATA_DIR` override
/// when set, else `./data` when present, else the per-user app data dir.
pub fn default_data_root() -> PathBuf {
    if let Ok(dir) = std::env::var("SWISH_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let local = PathBuf::from("data");
    if local.is_dir() {
        return local;
    }
    dirs::data_dir()
        .map(|d| d.join("swish").join("data"))
        .unwrap_or(local)
}

/// Read-only handle managed as Tauri state: the resolved data root plus the
/// trial list scanned once at startup.
pub struct TrialStore {
    data_dir: PathBuf,
    trials: Vec<TrialId>,
}

impl TrialStore {
    /// Scan `data_dir` and build the store.
    pub fn discover(data_dir: PathBuf) -> CatalogResult<Self> {
        let trials = scan_trials(&data_dir)?;
        Ok(TrialStore { data_dir, trials })
    }

    /// A store with no trials, for when the data root does not exist yet.
    pub fn empty(data_dir: PathBuf) -> Self {
        TrialStore {
            data_dir,
            trials: Vec::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Catalog order: sorted by participant then trial.
    pub fn trials(&self) -> &[TrialId] {
        &self.trials
    }

    /// Load one trial fresh from disk.
    pub fn load(&self, id: &TrialId) -> Result<Trial, LoadError> {
        loader::load_trial(&self.data_dir, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"{}").unwrap();
    }

    #[test]
    fn test_scan_sorts_by_participant_then_trial() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("P0002/BB_FT_P0002_T0001.json"));
        touch(&dir.path().join("P0001/BB_FT_P0001_T0002.json"));
        touch(&dir.path().join("P0001/BB_FT_P0001_T0001.json"));

        let trials = scan_trials(dir.path()).unwrap();
        let names: Vec<String> = trials.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "P0001/BB_FT_P0001_T0001",
                "P0001/BB_FT_P0001_T0002",
                "P0002/BB_FT_P0002_T0001",
            ]
        );
    }

    #[test]
    fn test_scan_skips_non_directories_and_non_json() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("README.md"));
        touch(&dir.path().join("P0001/notes.txt"));
        touch(&dir.path().join("P0001/BB_FT_P0001_T0001.json"));
        // A directory named like a trial file is not a trial.
        fs::create_dir_all(dir.path().join("P0001/BB_FT_P0001_T0002.json")).unwrap();

        let trials = scan_trials(dir.path()).unwrap();
        assert_eq!(trials.len(), 1);
        assert_eq!(trials[0].to_string(), "P0001/BB_FT_P0001_T0001");
    }

    #[test]
    fn test_scan_empty_participant_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("P0001")).unwrap();

        let trials = scan_trials(dir.path()).unwrap();
        assert!(trials.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        assert!(matches!(scan_trials(&missing), Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_store_lists_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let keypoint = "[0.0, 0.0, 0.0]";
        let names = [
            "L_SHOULDER", "R_SHOULDER", "L_ELBOW", "R_ELBOW", "L_WRIST", "R_WRIST", "L_HIP",
            "R_HIP", "L_KNEE", "R_KNEE", "L_ANKLE", "R_ANKLE",
        ];
        let player: Vec<String> = names.iter().map(|n| format!("\"{n}\": {keypoint}")).collect();
        let json = format!(
            "{{\"result\": \"missed\", \"entry_angle\": 38.0, \"landing_x\": 0.4, \"landing_y\": 0.1, \
             \"tracking\": [{{\"frame\": 0, \"time\": 0.0, \"data\": {{\"player\": {{{}}}, \"ball\": [NaN, NaN, NaN]}}}}]}}",
            player.join(", ")
        );
        let path = dir.path().join("P0007/BB_FT_P0007_T0003.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, json).unwrap();

        let store = TrialStore::discover(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.trials().len(), 1);

        let id = store.trials()[0].clone();
        let trial = store.load(&id).unwrap();
        assert_eq!(trial.id.to_string(), "P0007/BB_FT_P0007_T0003");
        assert!(!trial.result.is_made());
        assert!(trial.tracking[0].ball.is_none());
    }

    #[test]
    fn test_empty_store() {
        let store = TrialStore::empty(PathBuf::from("/nonexistent"));
        assert!(store.trials().is_empty());
    }
}
