//! Human-readable output. Everything JSON-shaped stays in the core types;
//! this module only turns them into lines with icons.

use chrono::NaiveDate;

use todoq_core::query::{days_overdue, is_overdue};
use todoq_core::suggest::{Focus, Impact, Insights, Suggestion};
use todoq_core::task::{Priority, Task};

pub fn status_icon(task: &Task) -> &'static str {
    if task.completed {
        "✅"
    } else {
        "🔲"
    }
}

pub fn priority_icon(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Normal => "🟡",
        Priority::Low => "🟢",
    }
}

pub fn impact_icon(impact: Impact) -> &'static str {
    match impact {
        Impact::High => "⚡",
        Impact::Medium => "📊",
        Impact::Low => "🌱",
    }
}

pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

pub fn heading_rule(width: usize) -> String {
    "=".repeat(width)
}

pub fn task_line(task: &Task, today: NaiveDate) -> String {
    let due = match task.due_date {
        Some(date) if date == today => " 📅 today".to_string(),
        Some(date) if is_overdue(task, today) => {
            let days = days_overdue(task, today).unwrap_or(0);
            let unit = if days == 1 { "day" } else { "days" };
            format!(" ⚠️  overdue {days} {unit} ({date})")
        }
        Some(date) => format!(" 📅 {date}"),
        None => String::new(),
    };
    format!(
        "  {} {} #{}: {}{}",
        status_icon(task),
        priority_icon(task.priority),
        task.id,
        task.description,
        due
    )
}

pub fn print_task_section(title: &str, tasks: &[&Task], today: NaiveDate) {
    if tasks.is_empty() {
        return;
    }
    println!("\n{} ({})", title, tasks.len());
    println!("{}", rule(30));
    for task in tasks {
        println!("{}", task_line(task, today));
    }
}

pub fn print_insights(report: &Insights) {
    println!("📊 Task Insights");
    println!("{}", heading_rule(50));
    println!("Total: {}", report.total);
    if report.total > 0 {
        let pct = |count: usize| count as f64 / report.total as f64 * 100.0;
        println!("Completed: {} ({:.1}%)", report.completed, pct(report.completed));
        println!("Pending: {} ({:.1}%)", report.pending, pct(report.pending));
    }
    if report.overdue > 0 {
        println!("⚠️  Overdue: {}", report.overdue);
    }
    if report.due_soon > 0 {
        println!("⏰ Due soon: {}", report.due_soon);
    }
    if report.no_date > 0 {
        println!("📝 No due date: {}", report.no_date);
    }
    println!("\nPending by priority");
    println!("{}", rule(30));
    println!("🔴 high: {}", report.high_pending);
    println!("🟡 normal: {}", report.normal_pending);
    println!("🟢 low: {}", report.low_pending);
    println!("\nDue today: {}", report.due_today);
    println!("Due this week: {}", report.due_this_week);
    println!("Due this month: {}", report.due_this_month);
    if report.upcoming_deadlines > 0 {
        println!(
            "📆 Upcoming deadlines: {} in the next 7 days",
            report.upcoming_deadlines
        );
    }
    println!("\n💚 Health score: {}/100", report.health_score);
}

pub fn print_suggestion(suggestion: &Suggestion<'_>, today: NaiveDate) {
    println!(
        "\n{} {} (score {}/100, {} tasks)",
        impact_icon(suggestion.impact),
        suggestion.category,
        suggestion.score,
        suggestion.tasks.len()
    );
    println!("   {}", suggestion.reason);
    println!("{}", rule(30));
    for task in &suggestion.tasks {
        println!("{}", task_line(task, today));
    }
}

pub fn focus_line(focus: &Focus) -> String {
    match focus {
        Focus::OverdueRecovery(count) => {
            format!("🎯 Focus: handle {count} overdue task(s) first")
        }
        Focus::DueToday(count) => format!("🎯 Focus: complete {count} task(s) due today"),
        Focus::HighPriority(count) => {
            format!("🎯 Focus: work on {count} high-priority task(s)")
        }
        Focus::QuickWins => "🎯 Focus: nothing urgent; pick up some quick wins".to_string(),
    }
}
