use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::{self, Config};
use crate::models::quadrant::{self, DAYS_PRESETS};
use crate::models::{BoardColumns, Quadrants, StatusFilter, Task, TaskDraft, TaskStatus, board};
use crate::state;
use crate::store::{StoreError, TaskStore};
use crate::ui::form::TaskForm;

/// Notification level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient message shown at the top of the screen.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

impl Notification {
    /// Notifications disappear on their own after 3 seconds.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= 3
    }
}

/// Which of the two views fills the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    /// 2x2 Eisenhower grid.
    Matrix,
    /// Three-column kanban board.
    Board,
}

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation across columns and rows.
    Normal,
    /// The task form dialog is open.
    Form,
    /// Delete confirmation dialog.
    ConfirmDelete,
    /// Key cheatsheet overlay.
    Help,
    /// Free-form threshold entry in the matrix view.
    ThresholdInput,
}

/// Application state.
///
/// `tasks` is a plain snapshot of the store. Every mutation goes through the
/// store first and then replaces the snapshot wholesale, so the UI never
/// renders a state the file does not already contain.
pub struct App {
    pub store: TaskStore,
    pub tasks: Vec<Task>,
    pub view: View,
    pub mode: Mode,
    /// Board: column index (0..3). Matrix: quadrant index (0..4).
    pub selected_column: usize,
    /// Row within the current column or quadrant.
    pub selected_index: usize,
    /// Matrix status filter.
    pub status_filter: StatusFilter,
    /// Matrix urgency threshold in days.
    pub days_threshold: u32,
    /// Open task form, if any.
    pub form: Option<TaskForm>,
    /// Task id awaiting delete confirmation.
    pub pending_delete: Option<String>,
    /// Buffer for free-form threshold entry.
    pub threshold_input: String,
    pub notification: Option<Notification>,
    pub config: Config,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = config::load_config()?;
        let store = TaskStore::open(config::data_file_path(&config))?;

        let mut app = Self {
            tasks: store.tasks().to_vec(),
            store,
            view: View::Matrix,
            mode: Mode::Normal,
            selected_column: 0,
            selected_index: 0,
            status_filter: StatusFilter::all(),
            days_threshold: config.days_threshold,
            form: None,
            pending_delete: None,
            threshold_input: String::new(),
            notification: None,
            config,
        };

        // A saved UI state wins over the configured defaults.
        match state::load_state() {
            Ok(Some(saved)) => state::apply_state(&mut app, saved),
            Ok(None) => {}
            Err(e) => debug!(%e, "ignoring unreadable state file"),
        }

        Ok(app)
    }

    // ===== Snapshot and selection =====

    /// Replace the snapshot with the store's current contents.
    pub fn reload(&mut self) {
        self.tasks = self.store.tasks().to_vec();
        self.clamp_row_selection();
    }

    /// Quadrant groups for the matrix view.
    pub fn quadrants(&self) -> Quadrants<'_> {
        quadrant::partition(&self.tasks, &self.status_filter, self.days_threshold)
    }

    /// Status columns for the board view.
    pub fn board_columns(&self) -> BoardColumns<'_> {
        board::columns(&self.tasks)
    }

    /// Tasks in the currently selected column or quadrant, render order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        match self.view {
            View::Board => {
                let cols = self.board_columns();
                TaskStatus::from_column(self.selected_column)
                    .map(|status| cols.get(status).to_vec())
                    .unwrap_or_default()
            }
            View::Matrix => {
                let quadrants = self.quadrants();
                quadrants
                    .titled()
                    .get(self.selected_column)
                    .map(|(_, tasks)| tasks.to_vec())
                    .unwrap_or_default()
            }
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected_index).copied()
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    pub fn column_count(&self) -> usize {
        match self.view {
            View::Board => 3,
            View::Matrix => 4,
        }
    }

    pub fn select_column(&mut self, delta: isize) {
        let count = self.column_count() as isize;
        self.selected_column = (self.selected_column as isize + delta).rem_euclid(count) as usize;
        self.clamp_row_selection();
    }

    pub fn select_row(&mut self, delta: isize) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index =
            (self.selected_index as isize + delta).rem_euclid(len as isize) as usize;
    }

    pub fn reset_row_selection(&mut self) {
        self.selected_index = 0;
    }

    fn clamp_row_selection(&mut self) {
        let len = self.visible_tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ===== Views =====

    pub fn switch_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.selected_column = 0;
            self.selected_index = 0;
        }
    }

    pub fn toggle_view(&mut self) {
        let next = match self.view {
            View::Matrix => View::Board,
            View::Board => View::Matrix,
        };
        self.switch_view(next);
    }

    // ===== Matrix controls =====

    pub fn toggle_status_filter(&mut self, status: TaskStatus) {
        self.status_filter.toggle(status);
        self.clamp_row_selection();
    }

    /// Cycle the urgency threshold through the presets. A custom value not
    /// in the list jumps back to the first preset.
    pub fn cycle_threshold(&mut self) {
        let next = DAYS_PRESETS
            .iter()
            .position(|&d| d == self.days_threshold)
            .map(|i| (i + 1) % DAYS_PRESETS.len())
            .unwrap_or(0);
        self.days_threshold = DAYS_PRESETS[next];
        self.clamp_row_selection();
    }

    /// Step the threshold by one day, clamped at zero.
    pub fn adjust_threshold(&mut self, delta: i64) {
        let next = (i64::from(self.days_threshold) + delta).max(0);
        self.days_threshold = next as u32;
        self.clamp_row_selection();
    }

    /// Commit the typed threshold. The input buffer only ever accepts
    /// digits, so a non-empty buffer always parses.
    pub fn submit_threshold_input(&mut self) {
        match self.threshold_input.trim().parse::<u32>() {
            Ok(days) => {
                self.days_threshold = days;
                self.clamp_row_selection();
                self.threshold_input.clear();
                self.mode = Mode::Normal;
            }
            Err(_) => {
                self.show_notification(
                    "Threshold must be a number of days".to_string(),
                    NotificationLevel::Warning,
                );
                self.threshold_input.clear();
            }
        }
    }

    // ===== Task mutations =====

    /// Create a task, write through, re-read.
    pub fn add_task(&mut self, draft: TaskDraft) {
        match self.store.add(draft) {
            Ok(task) => {
                info!(id = %task.id, "task created");
                self.reload();
                self.show_notification(
                    format!("Created \"{}\"", task.title),
                    NotificationLevel::Success,
                );
            }
            Err(e) => self.report_store_error("create task", e),
        }
    }

    /// Rewrite the task `id` with the draft's fields.
    pub fn apply_edit(&mut self, id: &str, draft: TaskDraft) {
        let existing = match self.store.get(id) {
            Some(task) => task.clone(),
            None => {
                // Edited task vanished underneath the form. Drop the edit.
                debug!(id, "edit target no longer exists");
                self.reload();
                return;
            }
        };
        let updated = Task {
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            status: draft.status,
            ..existing
        };
        match self.store.update(updated) {
            Ok(task) => {
                info!(id = %task.id, "task updated");
                self.reload();
                self.show_notification(
                    format!("Updated \"{}\"", task.title),
                    NotificationLevel::Success,
                );
            }
            Err(StoreError::NotFound { id }) => {
                debug!(id, "edit target no longer exists");
                self.reload();
            }
            Err(e) => self.report_store_error("update task", e),
        }
    }

    /// Move the selected task to `target`. Unknown ids and same-column
    /// moves are silent no-ops.
    pub fn move_selected(&mut self, target: TaskStatus) {
        let id = match self.selected_task_id() {
            Some(id) => id,
            None => return,
        };
        let planned = match board::resolve_move(&self.tasks, &id, target) {
            Some(task) => task.clone(),
            None => {
                debug!(id, target = %target, "move request was a no-op");
                return;
            }
        };
        let mut updated = planned;
        updated.status = target;
        match self.store.update(updated) {
            Ok(task) => {
                info!(id = %task.id, status = %task.status, "task moved");
                self.reload();
            }
            Err(StoreError::NotFound { id }) => {
                debug!(id, "move target no longer exists");
                self.reload();
            }
            Err(e) => self.report_store_error("move task", e),
        }
    }

    /// Move the selected task left or right by one board column.
    pub fn move_selected_by(&mut self, delta: isize) {
        let status = match self.selected_task() {
            Some(task) => task.status,
            None => return,
        };
        let column = status.column() as isize + delta;
        if let Some(target) = usize::try_from(column).ok().and_then(TaskStatus::from_column) {
            self.move_selected(target);
        }
    }

    pub fn delete_task(&mut self, id: &str) {
        match self.store.delete(id) {
            Ok(()) => {
                info!(id, "task deleted");
                self.reload();
                self.show_notification("Task deleted".to_string(), NotificationLevel::Info);
            }
            Err(StoreError::NotFound { id }) => {
                debug!(id, "delete target no longer exists");
                self.reload();
            }
            Err(e) => self.report_store_error("delete task", e),
        }
    }

    // ===== Dialogs =====

    /// Open the form empty, with the usual defaults prefilled.
    pub fn open_new_task_form(&mut self) {
        self.form = Some(TaskForm::new());
        self.mode = Mode::Form;
    }

    /// Open the form prefilled with the selected task.
    pub fn open_edit_form(&mut self) {
        let task = match self.selected_task() {
            Some(task) => task.clone(),
            None => return,
        };
        self.form = Some(TaskForm::edit(&task));
        self.mode = Mode::Form;
    }

    /// Submit the open form. On validation failure the form stays open with
    /// the field errors attached; nothing reaches the store.
    pub fn submit_form(&mut self) {
        let form = match self.form.take() {
            Some(form) => form,
            None => return,
        };
        match form.to_draft() {
            Ok(draft) => {
                match &form.editing {
                    Some(id) => {
                        let id = id.clone();
                        self.apply_edit(&id, draft);
                    }
                    None => self.add_task(draft),
                }
                self.mode = Mode::Normal;
            }
            Err(errors) => {
                let mut form = form;
                form.errors = errors;
                self.form = Some(form);
            }
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.mode = Mode::Normal;
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.pending_delete = Some(id);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            self.delete_task(&id);
        }
        self.mode = Mode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Normal;
    }

    /// Handle a key event. Returns false when the app should exit.
    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        crate::input::handle_key_input(self, key)
    }

    // ===== Notifications =====

    pub fn show_notification(&mut self, message: String, level: NotificationLevel) {
        self.notification = Some(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    pub fn clear_expired_notification(&mut self) {
        if let Some(ref notification) = self.notification {
            if notification.is_expired() {
                self.notification = None;
            }
        }
    }

    fn report_store_error(&mut self, action: &str, err: StoreError) {
        error!(%err, action, "store operation failed");
        self.show_notification(
            format!("Failed to {}: storage error", action),
            NotificationLevel::Error,
        );
    }
}
