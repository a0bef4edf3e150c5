mod bootstrap;
mod report;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use sales_core::settings::Settings;
use sales_runtime::dashboard::{DashboardConfig, DashboardState};
use sales_runtime::dataset_cache::DatasetCache;
use sales_ui::app::App;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bakery Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, View: {}, Theme: {}",
        settings.file.display(),
        settings.view,
        settings.theme
    );

    let cache = Arc::new(DatasetCache::new());
    let dataset = match cache.get_or_load_async(settings.file.clone()).await {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "failed to load sales data: {e}");
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let state = DashboardState::new(dataset, DashboardConfig::from(&settings));

    match settings.view.as_str() {
        "summary" => {
            let output = if settings.json_output() {
                report::render_json(&state)?
            } else {
                report::render_text(&state)
            };
            println!("{output}");
        }

        "dashboard" => {
            tracing::info!("Starting dashboard...");
            let app = App::new(&settings.theme, state);

            // The TUI exits on 'q' / Ctrl+C itself; the OS-level signal covers
            // signals delivered outside raw mode.
            tokio::select! {
                result = app.run() => result?,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down");
                }
            }
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
