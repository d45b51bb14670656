//! Similarity scoring, duplicate detection, cleanup suggestions, and the
//! task health score.

use std::collections::HashMap;

use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

use crate::query::{self, is_overdue};
use crate::task::{Priority, Task};

/// Descriptions shorter than this are treated as vague on their own.
const VAGUE_MIN_LEN: usize = 10;

const VAGUE_KEYWORDS: [&str; 8] = [
    "stuff", "things", "misc", "todo", "remember", "check", "fix", "update",
];

/// Naive similarity between a task description and a search pattern.
///
/// Exact match scores 1.0, substring containment 0.8, and otherwise the
/// fraction of pattern words that prefix- or substring-match a description
/// word, scaled by 0.6.
pub fn similarity(text: &str, pattern: &str) -> f64 {
    let text = text.to_lowercase();
    let pattern = pattern.to_lowercase();

    if text == pattern {
        return 1.0;
    }
    if !pattern.is_empty() && text.contains(&pattern) {
        return 0.8;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let pattern_words: Vec<&str> = pattern.split_whitespace().collect();
    if pattern_words.is_empty() {
        return 0.0;
    }

    let mut matches = 0usize;
    for pw in &pattern_words {
        if words
            .iter()
            .any(|tw| tw.starts_with(pw) || tw.contains(pw))
        {
            matches += 1;
        }
    }
    matches as f64 / pattern_words.len() as f64 * 0.6
}

const SEARCH_THRESHOLD: f64 = 0.3;
const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch<'a> {
    pub task: &'a Task,
    pub score: f64,
}

/// Fuzzy search over descriptions: matches above the threshold, ranked by
/// score descending (id breaks ties), top five.
pub fn search<'a>(tasks: &'a [Task], query: &str) -> Vec<SearchMatch<'a>> {
    let mut candidates: Vec<SearchMatch<'a>> = tasks
        .iter()
        .map(|task| SearchMatch {
            task,
            score: similarity(&task.description, query),
        })
        .filter(|m| m.score > SEARCH_THRESHOLD)
        .collect();
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.task.id.cmp(&b.task.id))
    });
    candidates.truncate(SEARCH_LIMIT);
    candidates
}

fn normalized_description(task: &Task) -> String {
    task.description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Of two tasks with the same normalized description, keep the one with a
/// due date, else the higher priority, else the first seen.
fn keep_first(first: &Task, second: &Task) -> bool {
    match (first.due_date.is_some(), second.due_date.is_some()) {
        (true, false) => true,
        (false, true) => false,
        _ => first.priority >= second.priority,
    }
}

/// Pending tasks whose normalized description duplicates an earlier task.
/// Returns the losers of each comparison, in detection order.
pub fn find_duplicates(tasks: &[Task]) -> Vec<&Task> {
    let mut duplicates: Vec<&Task> = Vec::new();
    let mut seen: HashMap<String, &Task> = HashMap::new();

    for task in tasks.iter().filter(|task| !task.completed) {
        let key = normalized_description(task);
        match seen.get(&key) {
            Some(existing) => {
                if keep_first(existing, task) {
                    duplicates.push(task);
                } else {
                    duplicates.push(existing);
                    seen.insert(key, task);
                }
            }
            None => {
                seen.insert(key, task);
            }
        }
    }
    duplicates
}

/// Pending tasks that are too short or lean on filler words to say anything.
pub fn vague_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .filter(|task| {
            let desc = task.description.to_lowercase();
            desc.len() < VAGUE_MIN_LEN || VAGUE_KEYWORDS.iter().any(|kw| desc.contains(kw))
        })
        .collect()
}

pub fn low_impact_tasks(tasks: &[Task]) -> Vec<&Task> {
    query::quick_wins(tasks)
}

/// Pending low-priority tasks due more than a month before `today`; likely
/// no longer relevant.
pub fn stale_low_priority_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    let cutoff = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(today - Duration::days(30));
    tasks
        .iter()
        .filter(|task| !task.completed && task.priority == Priority::Low)
        .filter(|task| task.due_date.map(|due| due < cutoff).unwrap_or(false))
        .collect()
}

pub fn overdue_high_priority_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.priority == Priority::High && is_overdue(task, today))
        .collect()
}

/// Additive-penalty health score: completion percentage minus 20 per overdue
/// task and 10 per pending high-priority task, clamped to 0..=100. An empty
/// list is perfectly healthy.
pub fn health_score(tasks: &[Task], today: NaiveDate) -> u8 {
    if tasks.is_empty() {
        return 100;
    }
    let total = tasks.len() as i64;
    let completed = tasks.iter().filter(|task| task.completed).count() as i64;
    let overdue = query::overdue(tasks, today).len() as i64;
    let high_pending = query::high_priority_pending(tasks).len() as i64;

    let score = completed * 100 / total - overdue * 20 - high_pending * 10;
    score.clamp(0, 100) as u8
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion<'a> {
    pub category: &'static str,
    pub reason: &'static str,
    /// 0-100: how beneficial acting on the suggestion would be.
    pub score: u8,
    pub impact: Impact,
    pub tasks: Vec<&'a Task>,
}

const LOW_IMPACT_SUGGEST_MIN: usize = 3;

/// Assemble cleanup suggestions for the delete view, highest score first.
pub fn cleanup_suggestions<'a>(tasks: &'a [Task], today: NaiveDate) -> Vec<Suggestion<'a>> {
    let mut suggestions = Vec::new();

    let overdue_high = overdue_high_priority_tasks(tasks, today);
    if !overdue_high.is_empty() {
        suggestions.push(Suggestion {
            category: "Stale high-priority tasks",
            reason: "High-priority tasks past their due date; complete, reschedule, or drop them.",
            score: 85,
            impact: Impact::High,
            tasks: overdue_high,
        });
    }

    let archived = query::completed(tasks);
    if !archived.is_empty() {
        suggestions.push(Suggestion {
            category: "Completed tasks",
            reason: "Finished work still on the list; safe to clear out.",
            score: 90,
            impact: Impact::Low,
            tasks: archived,
        });
    }

    let duplicates = find_duplicates(tasks);
    if !duplicates.is_empty() {
        suggestions.push(Suggestion {
            category: "Duplicate tasks",
            reason: "Tasks with matching descriptions; keeping one of each improves clarity.",
            score: 95,
            impact: Impact::Medium,
            tasks: duplicates,
        });
    }

    let low_impact = low_impact_tasks(tasks);
    if low_impact.len() > LOW_IMPACT_SUGGEST_MIN {
        suggestions.push(Suggestion {
            category: "Low-impact tasks",
            reason: "Low priority and no deadline; decide whether they are still worth tracking.",
            score: 60,
            impact: Impact::Low,
            tasks: low_impact.into_iter().take(LOW_IMPACT_SUGGEST_MIN).collect(),
        });
    }

    let vague = vague_tasks(tasks);
    if !vague.is_empty() {
        suggestions.push(Suggestion {
            category: "Unclear tasks",
            reason: "Vague descriptions; clarify or remove.",
            score: 70,
            impact: Impact::Medium,
            tasks: vague,
        });
    }

    let stale = stale_low_priority_tasks(tasks, today);
    if !stale.is_empty() {
        suggestions.push(Suggestion {
            category: "Stale low-priority tasks",
            reason: "Low priority and overdue by more than a month; likely no longer relevant.",
            score: 80,
            impact: Impact::Low,
            tasks: stale,
        });
    }

    suggestions.sort_by_key(|s| std::cmp::Reverse(s.score));
    suggestions
}

#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub no_date: usize,
    pub high_pending: usize,
    pub normal_pending: usize,
    pub low_pending: usize,
    pub due_today: usize,
    pub due_this_week: usize,
    pub due_this_month: usize,
    /// Deadlines in the next seven days, not counting today.
    pub upcoming_deadlines: usize,
    pub health_score: u8,
}

pub fn insights(tasks: &[Task], today: NaiveDate, window_days: i64) -> Insights {
    let pending: Vec<&Task> = query::pending(tasks);
    let dated_pending = |filter: crate::query::TimeFilter| {
        pending
            .iter()
            .filter(|task| task.due_date.is_some())
            .filter(|task| query::matches_time_filter(task, filter, today))
            .count()
    };
    Insights {
        total: tasks.len(),
        completed: query::completed(tasks).len(),
        pending: pending.len(),
        overdue: query::overdue(tasks, today).len(),
        due_soon: query::due_soon(tasks, today, window_days).len(),
        no_date: pending.iter().filter(|task| task.due_date.is_none()).count(),
        high_pending: pending
            .iter()
            .filter(|task| task.priority == Priority::High)
            .count(),
        normal_pending: pending
            .iter()
            .filter(|task| task.priority == Priority::Normal)
            .count(),
        low_pending: pending
            .iter()
            .filter(|task| task.priority == Priority::Low)
            .count(),
        due_today: dated_pending(crate::query::TimeFilter::Today),
        due_this_week: dated_pending(crate::query::TimeFilter::Week),
        due_this_month: dated_pending(crate::query::TimeFilter::Month),
        upcoming_deadlines: query::upcoming_deadlines(tasks, today).len(),
        health_score: health_score(tasks, today),
    }
}

/// What to work on next, in strict precedence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "focus", content = "count")]
pub enum Focus {
    /// Overdue tasks first; nothing else matters while work is late.
    OverdueRecovery(usize),
    DueToday(usize),
    HighPriority(usize),
    /// Nothing urgent: pick up some quick wins.
    QuickWins,
}

pub fn suggest_focus(tasks: &[Task], today: NaiveDate) -> Focus {
    let overdue = query::overdue(tasks, today).len();
    if overdue > 0 {
        return Focus::OverdueRecovery(overdue);
    }
    let today_count = query::due_today(tasks, today).len();
    if today_count > 0 {
        return Focus::DueToday(today_count);
    }
    let high = query::high_priority_pending(tasks).len();
    if high > 0 {
        return Focus::HighPriority(high);
    }
    Focus::QuickWins
}
