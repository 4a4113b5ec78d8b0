use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Due dates are entered and displayed as calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Highest allowed priority. Priorities run from 0 (lowest) to 10.
pub const PRIORITY_MAX: u8 = 10;

/// The three kanban columns, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Column title shown on the board.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Canonical name, identical to the stored form.
    pub fn name(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Board column index.
    pub fn column(&self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }

    /// Status sitting in the given board column.
    pub fn from_column(column: usize) -> Option<TaskStatus> {
        Self::ALL.get(column).copied()
    }

    /// Next status in column order, wrapping around.
    pub fn next(&self) -> TaskStatus {
        Self::ALL[(self.column() + 1) % Self::ALL.len()]
    }

    /// Previous status in column order, wrapping around.
    pub fn prev(&self) -> TaskStatus {
        Self::ALL[(self.column() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "todo" | "to_do" => Ok(TaskStatus::Todo),
            "in_progress" | "inprogress" | "doing" | "progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown status '{}' (expected todo, in_progress or done)",
                other
            )),
        }
    }
}

/// A single task record.
///
/// `id` and `created_at` are assigned by the store when the task is inserted
/// and never change afterwards; `updated_at` is refreshed by the store on
/// every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0 (lowest) to 10 (highest).
    pub priority: u8,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields a user supplies when creating a task. The store adds the id
/// and both timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: u8,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Check the invariants a draft must satisfy before it may reach the
    /// store. Reported per field so forms can surface them inline.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }
        if self.priority > PRIORITY_MAX {
            errors.push(FieldError::new(
                "priority",
                format!("Priority must be between 0 and {}", PRIORITY_MAX),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One form-field validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Parse and validate raw form input into a draft.
///
/// All fields are checked even after the first failure so every broken field
/// gets its own error. Nothing is written anywhere on failure.
pub fn draft_from_input(
    title: &str,
    description: &str,
    priority: &str,
    due_date: &str,
    status: TaskStatus,
) -> Result<TaskDraft, Vec<FieldError>> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }

    let priority_value = match priority.trim().parse::<u8>() {
        Ok(p) if p <= PRIORITY_MAX => Some(p),
        Ok(_) => {
            errors.push(FieldError::new(
                "priority",
                format!("Priority must be between 0 and {}", PRIORITY_MAX),
            ));
            None
        }
        Err(_) => {
            errors.push(FieldError::new(
                "priority",
                format!("Priority must be a number from 0 to {}", PRIORITY_MAX),
            ));
            None
        }
    };

    let due_value = if due_date.trim().is_empty() {
        errors.push(FieldError::new("due_date", "Due date is required"));
        None
    } else {
        match NaiveDate::parse_from_str(due_date.trim(), DATE_FORMAT) {
            Ok(d) => Some(d),
            Err(_) => {
                errors.push(FieldError::new(
                    "due_date",
                    "Due date must be a valid YYYY-MM-DD date",
                ));
                None
            }
        }
    };

    match (priority_value, due_value) {
        (Some(priority), Some(due_date)) if errors.is_empty() => Ok(TaskDraft {
            title: title.trim().to_string(),
            description: description.trim_end().to_string(),
            priority,
            due_date,
            status,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_aliases() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("TODO".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in-progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!(
            "doing".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("later".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_status_serialized_names() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: TaskStatus = serde_json::from_str("\"DONE\"").unwrap();
        assert_eq!(parsed, TaskStatus::Done);
    }

    #[test]
    fn test_status_column_roundtrip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_column(status.column()), Some(status));
        }
        assert_eq!(TaskStatus::from_column(3), None);
    }

    #[test]
    fn test_status_cycle() {
        assert_eq!(TaskStatus::Todo.next(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
        assert_eq!(TaskStatus::Todo.prev(), TaskStatus::Done);
    }

    #[test]
    fn test_draft_from_input_ok() {
        let draft = draft_from_input(
            "  Water plants ",
            "balcony first",
            "7",
            "2026-09-01",
            TaskStatus::Todo,
        )
        .unwrap();
        assert_eq!(draft.title, "Water plants");
        assert_eq!(draft.priority, 7);
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
        assert_eq!(draft.status, TaskStatus::Todo);
    }

    #[test]
    fn test_draft_blank_title_rejected() {
        let errors = draft_from_input("   ", "", "5", "2026-09-01", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_draft_bad_priority_rejected() {
        let errors = draft_from_input("a", "", "11", "2026-09-01", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors[0].field, "priority");

        let errors = draft_from_input("a", "", "high", "2026-09-01", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors[0].field, "priority");
    }

    #[test]
    fn test_draft_bad_date_rejected() {
        let errors = draft_from_input("a", "", "5", "not-a-date", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors[0].field, "due_date");

        let errors = draft_from_input("a", "", "5", "2026-13-40", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors[0].field, "due_date");

        let errors = draft_from_input("a", "", "5", "", TaskStatus::Todo).unwrap_err();
        assert_eq!(errors[0].field, "due_date");
    }

    #[test]
    fn test_draft_reports_every_broken_field() {
        let errors = draft_from_input("", "", "99", "nope", TaskStatus::Done).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "priority", "due_date"]);
    }

    #[test]
    fn test_validate_typed_draft() {
        let mut draft = TaskDraft {
            title: "Ship it".to_string(),
            description: String::new(),
            priority: 10,
            due_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            status: TaskStatus::InProgress,
        };
        assert!(draft.validate().is_ok());

        draft.priority = 11;
        draft.title = " ".to_string();
        let errors = draft.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "priority"]);
    }
}
