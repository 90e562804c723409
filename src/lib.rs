// Swish - Free Throw Biomechanics Dashboard
// Module declarations

use tauri::Manager;

mod capture;
mod commands;
mod metrics;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // Scan the trial catalog once; a missing data root is not fatal,
            // the dashboard just starts empty.
            let data_dir = capture::default_data_root();
            let store = match capture::TrialStore::discover(data_dir.clone()) {
                Ok(store) => store,
                Err(e) => {
                    log::warn!(
                        "No usable data root at {}: {}",
                        data_dir.display(),
                        e
                    );
                    capture::TrialStore::empty(data_dir)
                }
            };
            log::info!(
                "Catalog ready: {} trials under {}",
                store.trials().len(),
                store.data_dir().display()
            );

            app.manage(store);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::list_trials,
            commands::get_shot_summary,
            commands::get_trial_metrics,
            commands::get_ball_path,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
