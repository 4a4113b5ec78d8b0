use crate::models::task::{Task, TaskStatus};

/// Tasks grouped into the three board columns, store order preserved.
#[derive(Debug, Default)]
pub struct BoardColumns<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> BoardColumns<'a> {
    pub fn get(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }
}

/// Group a task snapshot by status column.
pub fn columns(tasks: &[Task]) -> BoardColumns<'_> {
    let mut cols = BoardColumns::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => cols.todo.push(task),
            TaskStatus::InProgress => cols.in_progress.push(task),
            TaskStatus::Done => cols.done.push(task),
        }
    }
    cols
}

/// Decide whether a "move task to column" request does anything.
///
/// Returns the task to rewrite, or `None` when the id is unknown (the
/// selection went stale) or the task already sits in the target column.
/// `None` means the caller writes nothing and raises no error.
pub fn resolve_move<'a>(tasks: &'a [Task], task_id: &str, target: TaskStatus) -> Option<&'a Task> {
    let task = tasks.iter().find(|t| t.id == task_id)?;
    if task.status == target {
        return None;
    }
    Some(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn task(id: &str, status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: format!("task {}", id),
            description: String::new(),
            priority: 5,
            due_date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_columns_group_by_status() {
        let tasks = vec![
            task("a", TaskStatus::Todo),
            task("b", TaskStatus::Done),
            task("c", TaskStatus::Todo),
            task("d", TaskStatus::InProgress),
        ];

        let cols = columns(&tasks);
        let ids: Vec<&str> = cols.todo.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(cols.in_progress.len(), 1);
        assert_eq!(cols.done.len(), 1);
        assert_eq!(cols.get(TaskStatus::Done)[0].id, "b");
    }

    #[test]
    fn test_move_to_other_column_resolves() {
        let tasks = vec![task("a", TaskStatus::Todo)];
        let hit = resolve_move(&tasks, "a", TaskStatus::InProgress);
        assert_eq!(hit.map(|t| t.id.as_str()), Some("a"));
    }

    #[test]
    fn test_move_to_same_column_is_noop() {
        let tasks = vec![task("a", TaskStatus::Done)];
        assert!(resolve_move(&tasks, "a", TaskStatus::Done).is_none());
    }

    #[test]
    fn test_move_of_unknown_id_is_noop() {
        let tasks = vec![task("a", TaskStatus::Todo)];
        assert!(resolve_move(&tasks, "ghost", TaskStatus::Done).is_none());
    }

    #[test]
    fn test_move_on_empty_snapshot_is_noop() {
        assert!(resolve_move(&[], "a", TaskStatus::Done).is_none());
    }
}
