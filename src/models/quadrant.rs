use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::task::{Task, TaskStatus};

/// Priority at or above which a task counts as important.
pub const IMPORTANT_MIN_PRIORITY: u8 = 7;

/// Urgency threshold in days used when nothing overrides it.
pub const DEFAULT_DAYS_THRESHOLD: u32 = 3;

/// Threshold presets the matrix view cycles through.
pub const DAYS_PRESETS: [u32; 4] = [0, 3, 7, 30];

/// Which statuses the matrix shows. An empty set filters nothing out, so
/// "everything unticked" and "everything ticked" render the same tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilter {
    enabled: HashSet<TaskStatus>,
}

impl StatusFilter {
    /// Filter with every status ticked, the matrix default.
    pub fn all() -> Self {
        Self {
            enabled: TaskStatus::ALL.into_iter().collect(),
        }
    }

    /// Empty filter. Excludes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, status: TaskStatus) {
        if !self.enabled.remove(&status) {
            self.enabled.insert(status);
        }
    }

    /// Whether the status is explicitly ticked.
    pub fn is_enabled(&self, status: TaskStatus) -> bool {
        self.enabled.contains(&status)
    }

    /// Whether a task with this status passes the filter.
    pub fn allows(&self, status: TaskStatus) -> bool {
        self.enabled.is_empty() || self.enabled.contains(&status)
    }
}

/// The four Eisenhower groups. Disjoint, and together they hold every task
/// that passed the status filter.
#[derive(Debug, Default)]
pub struct Quadrants<'a> {
    /// Urgent and important.
    pub q1: Vec<&'a Task>,
    /// Important, not urgent.
    pub q2: Vec<&'a Task>,
    /// Urgent, not important.
    pub q3: Vec<&'a Task>,
    /// Neither urgent nor important.
    pub q4: Vec<&'a Task>,
}

impl<'a> Quadrants<'a> {
    pub fn total(&self) -> usize {
        self.q1.len() + self.q2.len() + self.q3.len() + self.q4.len()
    }

    /// Quadrants in reading order with their display titles.
    pub fn titled(&self) -> [(&'static str, &[&'a Task]); 4] {
        [
            ("Urgent & Important", self.q1.as_slice()),
            ("Not Urgent & Important", self.q2.as_slice()),
            ("Urgent & Not Important", self.q3.as_slice()),
            ("Not Urgent & Not Important", self.q4.as_slice()),
        ]
    }
}

/// Partition tasks into the four Eisenhower quadrants.
///
/// "Today" is resolved once per call so every comparison in one pass sees
/// the same date, even across a midnight rollover.
pub fn partition<'a>(
    tasks: &'a [Task],
    filter: &StatusFilter,
    days_threshold: u32,
) -> Quadrants<'a> {
    partition_at(tasks, filter, days_threshold, Local::now().date_naive())
}

/// [`partition`] against an explicit notion of today.
///
/// A task due exactly on the horizon date still counts as urgent, so with a
/// zero-day threshold anything due today is urgent already. Input order is
/// preserved within each quadrant.
pub fn partition_at<'a>(
    tasks: &'a [Task],
    filter: &StatusFilter,
    days_threshold: u32,
    today: NaiveDate,
) -> Quadrants<'a> {
    let horizon = today
        .checked_add_days(Days::new(u64::from(days_threshold)))
        .unwrap_or(NaiveDate::MAX);

    let mut quadrants = Quadrants::default();
    for task in tasks.iter().filter(|t| filter.allows(t.status)) {
        let important = task.priority >= IMPORTANT_MIN_PRIORITY;
        let urgent = task.due_date <= horizon;
        match (urgent, important) {
            (true, true) => quadrants.q1.push(task),
            (false, true) => quadrants.q2.push(task),
            (true, false) => quadrants.q3.push(task),
            (false, false) => quadrants.q4.push(task),
        }
    }
    quadrants
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, priority: u8, due: NaiveDate, status: TaskStatus) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: format!("task {}", id),
            description: String::new(),
            priority,
            due_date: due,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_four_way_split() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("a", 8, today, TaskStatus::Todo),
            task("b", 8, day(2026, 9, 4), TaskStatus::Todo),
            task("c", 3, today, TaskStatus::Todo),
            task("d", 3, day(2026, 9, 4), TaskStatus::Todo),
        ];

        let q = partition_at(&tasks, &StatusFilter::none(), 3, today);
        assert_eq!(ids(&q.q1), vec!["a"]);
        assert_eq!(ids(&q.q2), vec!["b"]);
        assert_eq!(ids(&q.q3), vec!["c"]);
        assert_eq!(ids(&q.q4), vec!["d"]);
    }

    #[test]
    fn test_horizon_date_is_inclusive() {
        let today = day(2026, 8, 25);
        let on_horizon = task("edge", 9, day(2026, 8, 28), TaskStatus::Todo);
        let past_horizon = task("past", 9, day(2026, 8, 29), TaskStatus::Todo);
        let tasks = vec![on_horizon, past_horizon];

        let q = partition_at(&tasks, &StatusFilter::none(), 3, today);
        assert_eq!(ids(&q.q1), vec!["edge"]);
        assert_eq!(ids(&q.q2), vec!["past"]);
    }

    #[test]
    fn test_zero_threshold_means_due_today() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("now", 2, today, TaskStatus::Todo),
            task("tomorrow", 2, day(2026, 8, 26), TaskStatus::Todo),
            task("overdue", 2, day(2026, 8, 1), TaskStatus::Todo),
        ];

        let q = partition_at(&tasks, &StatusFilter::none(), 0, today);
        assert_eq!(ids(&q.q3), vec!["now", "overdue"]);
        assert_eq!(ids(&q.q4), vec!["tomorrow"]);
    }

    #[test]
    fn test_priority_boundary_at_seven() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("six", 6, today, TaskStatus::Todo),
            task("seven", 7, today, TaskStatus::Todo),
        ];

        let q = partition_at(&tasks, &StatusFilter::none(), 0, today);
        assert_eq!(ids(&q.q1), vec!["seven"]);
        assert_eq!(ids(&q.q3), vec!["six"]);
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let today = day(2026, 8, 25);
        let tasks: Vec<Task> = (0..20)
            .map(|i| {
                task(
                    &format!("t{}", i),
                    (i % 11) as u8,
                    day(2026, 8, 20 + (i % 10)),
                    TaskStatus::ALL[(i % 3) as usize],
                )
            })
            .collect();

        let q = partition_at(&tasks, &StatusFilter::none(), 3, today);
        assert_eq!(q.total(), tasks.len());

        let mut seen = HashSet::new();
        for (_, group) in q.titled() {
            for t in group {
                assert!(seen.insert(t.id.clone()), "{} appeared twice", t.id);
            }
        }
        assert_eq!(seen.len(), tasks.len());
    }

    #[test]
    fn test_status_filter_applies_before_partitioning() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("open", 8, today, TaskStatus::Todo),
            task("busy", 8, today, TaskStatus::InProgress),
            task("shipped", 8, today, TaskStatus::Done),
        ];

        let mut filter = StatusFilter::none();
        filter.toggle(TaskStatus::Todo);
        filter.toggle(TaskStatus::InProgress);

        let q = partition_at(&tasks, &filter, 0, today);
        assert_eq!(ids(&q.q1), vec!["open", "busy"]);
        assert_eq!(q.total(), 2);
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("a", 8, today, TaskStatus::Todo),
            task("b", 1, today, TaskStatus::Done),
        ];

        let q = partition_at(&tasks, &StatusFilter::none(), 0, today);
        assert_eq!(q.total(), 2);
        let q = partition_at(&tasks, &StatusFilter::all(), 0, today);
        assert_eq!(q.total(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_quadrants() {
        let q = partition_at(&[], &StatusFilter::all(), 3, day(2026, 8, 25));
        assert_eq!(q.total(), 0);
        assert!(q.q1.is_empty() && q.q2.is_empty() && q.q3.is_empty() && q.q4.is_empty());
    }

    #[test]
    fn test_partition_is_pure() {
        let today = day(2026, 8, 25);
        let tasks = vec![
            task("a", 8, today, TaskStatus::Todo),
            task("b", 3, day(2026, 9, 4), TaskStatus::Done),
        ];
        let filter = StatusFilter::all();

        let first = partition_at(&tasks, &filter, 3, today);
        let second = partition_at(&tasks, &filter, 3, today);
        assert_eq!(ids(&first.q1), ids(&second.q1));
        assert_eq!(ids(&first.q4), ids(&second.q4));
    }

    #[test]
    fn test_huge_threshold_saturates() {
        let today = day(2026, 8, 25);
        let tasks = vec![task("far", 2, day(2262, 1, 1), TaskStatus::Todo)];

        let q = partition_at(&tasks, &StatusFilter::none(), u32::MAX, today);
        assert_eq!(ids(&q.q3), vec!["far"]);
    }

    #[test]
    fn test_filter_toggle_roundtrip() {
        let mut filter = StatusFilter::all();
        assert!(filter.is_enabled(TaskStatus::Done));
        filter.toggle(TaskStatus::Done);
        assert!(!filter.is_enabled(TaskStatus::Done));
        assert!(!filter.allows(TaskStatus::Done));
        filter.toggle(TaskStatus::Done);
        assert!(filter.allows(TaskStatus::Done));
    }
}
