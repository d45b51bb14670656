//! Pure date-range filters and ordering over a task collection.
//!
//! Every function takes the reference date as a parameter; nothing here
//! reads the clock, the filesystem, or stdin.

use std::cmp::Reverse;

use chrono::{Duration, NaiveDate};

use crate::task::{Priority, Task};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TimeFilter {
    #[default]
    Today,
    Week,
    Month,
    All,
}

/// Overdue means strictly before `today`; a task due today still has time.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    if task.completed {
        return false;
    }
    match task.due_date {
        Some(due) => due < today,
        None => false,
    }
}

/// Due soon covers `today ..= today + window_days`. The window is inclusive
/// of today: a task due today is the most urgent thing that is not yet late.
pub fn is_due_soon(task: &Task, today: NaiveDate, window_days: i64) -> bool {
    if task.completed {
        return false;
    }
    match task.due_date {
        Some(due) => due >= today && due <= today + Duration::days(window_days),
        None => false,
    }
}

/// Undated tasks match every time filter: untracked work is always shown.
pub fn matches_time_filter(task: &Task, filter: TimeFilter, today: NaiveDate) -> bool {
    if filter == TimeFilter::All {
        return true;
    }
    let Some(due) = task.due_date else {
        return true;
    };
    match filter {
        TimeFilter::Today => due == today,
        // Rolling window: today plus the next six days.
        TimeFilter::Week => due >= today && due <= today + Duration::days(6),
        TimeFilter::Month => {
            use chrono::Datelike;
            due.year() == today.year() && due.month() == today.month()
        }
        TimeFilter::All => true,
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub time: TimeFilter,
    pub priority: Option<Priority>,
    pub completed_only: bool,
    pub pending_only: bool,
    pub overdue_only: bool,
    pub due_soon_only: bool,
    pub no_date_only: bool,
}

impl TaskFilter {
    /// Overdue / due-soon / no-date select their own date range, so the
    /// time filter (and the overdue/due-soon footer) does not apply.
    pub fn has_special_filter(&self) -> bool {
        self.overdue_only || self.due_soon_only || self.no_date_only
    }
}

/// Apply filters, then sort into the canonical display order. The special
/// filters (overdue / due-soon / no-date) supersede the time filter.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    filter: &TaskFilter,
    today: NaiveDate,
    window_days: i64,
) -> Vec<&'a Task> {
    let mut result: Vec<&Task> = tasks.iter().collect();

    if filter.overdue_only {
        result.retain(|task| is_overdue(task, today));
    }
    if filter.due_soon_only {
        result.retain(|task| is_due_soon(task, today, window_days));
    }
    if filter.no_date_only {
        result.retain(|task| task.due_date.is_none());
    }
    if !filter.has_special_filter() {
        result.retain(|task| matches_time_filter(task, filter.time, today));
    }
    if let Some(priority) = filter.priority {
        result.retain(|task| task.priority == priority);
    }
    if filter.completed_only && !filter.pending_only {
        result.retain(|task| task.completed);
    } else if filter.pending_only && !filter.completed_only {
        result.retain(|task| !task.completed);
    }

    sort_tasks(result)
}

/// Canonical order: pending before completed, priority descending, earlier
/// due dates first, dated before undated, id as the final tiebreak.
pub fn sort_tasks(mut tasks: Vec<&Task>) -> Vec<&Task> {
    tasks.sort_by_key(|task| {
        (
            task.completed,
            Reverse(task.priority),
            task.due_date.is_none(),
            task.due_date,
            task.id,
        )
    });
    tasks
}

pub fn pending(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.is_pending()).collect()
}

pub fn completed(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|task| task.completed).collect()
}

pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.completed && task.due_date == Some(today))
        .collect()
}

pub fn due_soon(tasks: &[Task], today: NaiveDate, window_days: i64) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| is_due_soon(task, today, window_days))
        .collect()
}

pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| is_overdue(task, today))
        .collect()
}

pub fn high_priority_pending(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.is_pending() && task.priority == Priority::High)
        .collect()
}

/// Quick wins: pending, low priority, no deadline pressure.
pub fn quick_wins(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.completed && task.priority == Priority::Low && task.due_date.is_none())
        .collect()
}

/// Deadlines in the next seven days, exclusive of today (today's tasks are
/// reported by `due_today`).
pub fn upcoming_deadlines(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| {
            !task.completed
                && task
                    .due_date
                    .map(|due| due > today && due <= today + Duration::days(7))
                    .unwrap_or(false)
        })
        .collect()
}

/// Number of whole days a task is late. `None` when not overdue.
pub fn days_overdue(task: &Task, today: NaiveDate) -> Option<i64> {
    if !is_overdue(task, today) {
        return None;
    }
    task.due_date.map(|due| (today - due).num_days())
}
