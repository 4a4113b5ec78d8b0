/// UI state persistence across runs.
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::app::{App, View};
use crate::config;
use crate::models::StatusFilter;
use crate::models::quadrant::DEFAULT_DAYS_THRESHOLD;

/// The slice of the UI worth restoring on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    pub view: View,
    pub days_threshold: u32,
    pub status_filter: StatusFilter,
    pub selected_column: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Matrix,
            days_threshold: DEFAULT_DAYS_THRESHOLD,
            status_filter: StatusFilter::all(),
            selected_column: 0,
        }
    }
}

/// State file path (~/.eisenban/state.json).
fn get_state_file_path() -> PathBuf {
    config::get_data_dir().join("state.json")
}

/// Extract persistable state from the app.
pub fn extract_state(app: &App) -> AppState {
    AppState {
        view: app.view,
        days_threshold: app.days_threshold,
        status_filter: app.status_filter.clone(),
        selected_column: app.selected_column,
    }
}

/// Save state to the file.
pub fn save_state(state: &AppState) -> Result<()> {
    let state_path = get_state_file_path();

    if let Some(parent) = state_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(state_path, json)?;

    Ok(())
}

/// Load state from the file. `None` on a first run, so the caller can keep
/// its configured defaults.
pub fn load_state() -> Result<Option<AppState>> {
    let state_path = get_state_file_path();

    if !state_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(state_path)?;
    let state: AppState = serde_json::from_str(&content)?;

    Ok(Some(state))
}

/// Apply saved state to the app. The selected column is clamped in case the
/// saved view and column disagree.
pub fn apply_state(app: &mut App, state: AppState) {
    app.view = state.view;
    app.days_threshold = state.days_threshold;
    app.status_filter = state.status_filter;
    app.selected_column = state.selected_column.min(app.column_count() - 1);
    app.reset_row_selection();
}
