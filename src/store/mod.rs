//! File-backed task store.
//!
//! One JSON document holds the whole collection. Every mutation rewrites the
//! file before returning, so a completed call is durable. The handle is
//! constructed explicitly and passed to whoever needs it; there is no global
//! connection state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Task, TaskDraft, TaskStatus};

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no task with id {id}")]
    NotFound { id: String },
    #[error("generated id {id} already exists")]
    DuplicateId { id: String },
    #[error("task file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store at `path`, loading any existing collection.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// an error rather than a silent reset, since the file may hold the only
    /// copy of someone's tasks.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tasks = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            Vec::new()
        };
        Ok(Self { path, tasks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full snapshot in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a single task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Insert a new task. Assigns the id and both timestamps, persists, and
    /// returns the stored record.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let id = Uuid::new_v4().to_string();
        if self.get(&id).is_some() {
            return Err(StoreError::DuplicateId { id });
        }
        let now = Utc::now();
        let task = Task {
            id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            due_date: draft.due_date,
            status: draft.status,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        self.save()?;
        Ok(task)
    }

    /// Overwrite an existing task, matched by id.
    ///
    /// The stored `created_at` is kept and `updated_at` is stamped here, so
    /// callers cannot break the timestamp invariants by handing in a stale
    /// or hand-built record.
    pub fn update(&mut self, task: Task) -> Result<Task, StoreError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| StoreError::NotFound { id: task.id.clone() })?;
        let updated = Task {
            created_at: slot.created_at,
            updated_at: Utc::now(),
            ..task
        };
        *slot = updated.clone();
        self.save()?;
        Ok(updated)
    }

    /// Remove a task by id.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        self.tasks.remove(index);
        self.save()
    }

    /// Tasks in one status column, store order.
    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Tasks at or above a priority.
    pub fn with_min_priority(&self, priority: u8) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.priority >= priority)
            .collect()
    }

    /// Tasks due on or before `date`.
    pub fn due_on_or_before(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.due_date <= date).collect()
    }

    /// Finished tasks.
    pub fn completed(&self) -> Vec<&Task> {
        self.by_status(TaskStatus::Done)
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.tasks)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
