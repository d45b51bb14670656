mod render;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use todoq_core::config::{load_config, resolve_data_file_override, resolve_due_soon_days};
use todoq_core::query::{self, TaskFilter, TimeFilter};
use todoq_core::store;
use todoq_core::suggest;
use todoq_core::task::{parse_due_date, Priority, Task};

#[derive(Parser)]
#[command(name = "todoq", version, about = "Todo list manager with smart filtering and suggestions")]
struct Cli {
    /// Task file to operate on (default: $TODOQ_HOME/tasks.json or ~/.todoq/tasks.json)
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new task
    Add {
        description: String,
        /// Due date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
        /// Priority: low/l, normal/n, high/h
        #[arg(short, long, default_value = "normal")]
        priority: Priority,
    },
    /// List tasks with filters and insights
    List {
        /// Show this week's tasks
        #[arg(short, long)]
        week: bool,
        /// Show this month's tasks
        #[arg(short, long)]
        month: bool,
        /// Show all tasks
        #[arg(short, long)]
        all: bool,
        /// Filter by priority
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Show only completed tasks
        #[arg(long)]
        completed: bool,
        /// Show only pending tasks
        #[arg(long)]
        pending: bool,
        /// Show only overdue tasks
        #[arg(long)]
        overdue: bool,
        /// Show tasks inside the due-soon window
        #[arg(long)]
        due_soon: bool,
        /// Show tasks without a due date
        #[arg(long)]
        no_date: bool,
        /// Show productivity insights instead of the task list
        #[arg(short, long)]
        insights: bool,
        /// Print JSON instead of the human view
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done (or edit its fields) by id or name
    Mark {
        /// Task id or a fragment of its description
        identifier: String,
        /// Mark as not done instead
        #[arg(short, long)]
        undone: bool,
        /// Change the due date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        due: Option<String>,
        /// Change the priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Change the description
        #[arg(long, value_name = "TEXT")]
        desc: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Delete tasks by id or name, or get cleanup suggestions
    Delete {
        /// Task id or a fragment of its description
        identifier: Option<String>,
        /// Delete all completed tasks
        #[arg(long)]
        completed: bool,
        /// Delete duplicate tasks
        #[arg(long)]
        duplicates: bool,
        /// Delete low-impact tasks (low priority, no due date)
        #[arg(long)]
        low_impact: bool,
        /// Show cleanup suggestions without deleting anything
        #[arg(long)]
        suggest: bool,
        /// Skip confirmation prompts
        #[arg(short, long)]
        force: bool,
    },
    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();
    let path = data_file(cli.file.as_deref(), config.as_ref())?;
    let window_days = resolve_due_soon_days(config.as_ref());
    let today = Local::now().date_naive();

    match cli.command {
        Command::Add {
            description,
            due,
            priority,
        } => cmd_add(&path, &description, due.as_deref(), priority),
        Command::List {
            week,
            month,
            all,
            priority,
            completed,
            pending,
            overdue,
            due_soon,
            no_date,
            insights,
            json,
        } => {
            let filter = TaskFilter {
                time: time_filter(week, month, all),
                priority,
                completed_only: completed,
                pending_only: pending,
                overdue_only: overdue,
                due_soon_only: due_soon,
                no_date_only: no_date,
            };
            cmd_list(&path, &filter, insights, json, today, window_days)
        }
        Command::Mark {
            identifier,
            undone,
            due,
            priority,
            desc,
            force,
        } => cmd_mark(
            &path,
            &identifier,
            undone,
            due.as_deref(),
            priority,
            desc.as_deref(),
            force,
            today,
        ),
        Command::Delete {
            identifier,
            completed,
            duplicates,
            low_impact,
            suggest,
            force,
        } => cmd_delete(
            &path,
            identifier.as_deref(),
            completed,
            duplicates,
            low_impact,
            suggest,
            force,
            today,
        ),
        Command::Version => {
            println!("todoq {}", todoq_core::version());
            Ok(())
        }
    }
}

fn data_file(cli_file: Option<&Path>, config: Option<&todoq_core::config::TodoqConfig>) -> Result<PathBuf> {
    if let Some(path) = cli_file {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = resolve_data_file_override(config) {
        return Ok(path);
    }
    store::default_data_file().context("could not resolve the task file location")
}

fn time_filter(week: bool, month: bool, all: bool) -> TimeFilter {
    if week {
        TimeFilter::Week
    } else if month {
        TimeFilter::Month
    } else if all {
        TimeFilter::All
    } else {
        TimeFilter::Today
    }
}

fn cmd_add(path: &Path, description: &str, due: Option<&str>, priority: Priority) -> Result<()> {
    if description.trim().is_empty() {
        bail!("task description must not be empty");
    }
    let due_date = due.map(parse_due_date).transpose()?;
    let mut store = store::load(path)?;
    let task = store.add(description, due_date, priority);
    let line = format!(
        "Added task #{}: {} (priority: {}{})",
        task.id,
        task.description,
        task.priority,
        task.due_date
            .map(|date| format!(", due: {date}"))
            .unwrap_or_default()
    );
    store::save(path, &store)?;
    println!("{line}");
    Ok(())
}

fn cmd_list(
    path: &Path,
    filter: &TaskFilter,
    insights: bool,
    json: bool,
    today: NaiveDate,
    window_days: i64,
) -> Result<()> {
    let store = store::load(path)?;

    if insights {
        let report = suggest::insights(&store.tasks, today, window_days);
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            render::print_insights(&report);
        }
        return Ok(());
    }

    if store.tasks.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("No tasks yet. Use 'todoq add \"description\"' to create one.");
        }
        return Ok(());
    }

    let filtered = query::filter_tasks(&store.tasks, filter, today, window_days);

    if json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    if filtered.is_empty() {
        println!("No tasks match the given filters.");
        return Ok(());
    }

    println!("📅 Tasks ({today})");
    println!("{}", render::heading_rule(50));
    let total = filtered.len();
    let overdue = filtered
        .iter()
        .filter(|task| query::is_overdue(task, today))
        .count();
    let due_soon = filtered
        .iter()
        .filter(|task| query::is_due_soon(task, today, window_days))
        .count();
    let (pending, completed): (Vec<&Task>, Vec<&Task>) =
        filtered.into_iter().partition(|task| !task.completed);
    render::print_task_section("🔲 Pending", &pending, today);
    render::print_task_section("✅ Completed", &completed, today);
    println!("\nTotal: {total} task(s)");

    // Footer counts describe the listed tasks; the special filters already
    // say what they show.
    if !filter.has_special_filter() && (overdue > 0 || due_soon > 0) {
        println!("💡 {} overdue, {} due soon", overdue, due_soon);
    }
    println!("{}", render::focus_line(&suggest::suggest_focus(&store.tasks, today)));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_mark(
    path: &Path,
    identifier: &str,
    undone: bool,
    due: Option<&str>,
    priority: Option<Priority>,
    desc: Option<&str>,
    force: bool,
    today: NaiveDate,
) -> Result<()> {
    let mut store = store::load(path)?;
    let task = store
        .find(identifier)
        .with_context(|| format!("no task matches '{identifier}'"))?;
    let id = task.id;
    let description = task.description.clone();

    if due.is_some() || priority.is_some() || desc.is_some() {
        if let Some(due) = due {
            let date = parse_due_date(due)?;
            store.set_due_date(id, Some(date))?;
            println!("📅 Task #{id}: due date set to {date}");
        }
        if let Some(priority) = priority {
            store.set_priority(id, priority)?;
            println!("🎯 Task #{id}: priority set to {priority}");
        }
        if let Some(desc) = desc {
            if desc.trim().is_empty() {
                bail!("task description must not be empty");
            }
            store.set_description(id, desc)?;
            println!("📝 Task #{id}: description updated");
        }
        store::save(path, &store)?;
        return Ok(());
    }

    let action = if undone {
        "Mark as not done"
    } else {
        "Complete"
    };
    if !force && !confirm(&format!("{action} task #{id}: {description}")) {
        println!("Cancelled.");
        return Ok(());
    }
    store.set_completed(id, !undone)?;
    store::save(path, &store)?;
    if undone {
        println!("🔲 Task #{id} marked as not done: {description}");
    } else {
        println!("✅ Task #{id} completed: {description}");
        println!(
            "{}",
            render::focus_line(&suggest::suggest_focus(&store.tasks, today))
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_delete(
    path: &Path,
    identifier: Option<&str>,
    completed: bool,
    duplicates: bool,
    low_impact: bool,
    suggest_only: bool,
    force: bool,
    today: NaiveDate,
) -> Result<()> {
    let mut store = store::load(path)?;
    if store.tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    if suggest_only || (identifier.is_none() && !completed && !duplicates && !low_impact) {
        let suggestions = suggest::cleanup_suggestions(&store.tasks, today);
        if suggestions.is_empty() {
            println!("🎉 Nothing to clean up.");
            return Ok(());
        }
        println!("🧹 Cleanup suggestions");
        println!("{}", render::heading_rule(50));
        for suggestion in &suggestions {
            render::print_suggestion(suggestion, today);
        }
        println!("\nUse 'todoq delete --completed | --duplicates | --low-impact' to act on these.");
        return Ok(());
    }

    if completed || duplicates || low_impact {
        let (ids, what): (Vec<u32>, &str) = if completed {
            (
                query::completed(&store.tasks).iter().map(|t| t.id).collect(),
                "completed task(s)",
            )
        } else if duplicates {
            (
                suggest::find_duplicates(&store.tasks)
                    .iter()
                    .map(|t| t.id)
                    .collect(),
                "duplicate task(s)",
            )
        } else {
            (
                suggest::low_impact_tasks(&store.tasks)
                    .iter()
                    .map(|t| t.id)
                    .collect(),
                "low-impact task(s)",
            )
        };
        if ids.is_empty() {
            println!("No {what} found.");
            return Ok(());
        }
        for id in &ids {
            if let Some(task) = store.get(*id) {
                println!("{}", render::task_line(task, today));
            }
        }
        if !force && !confirm(&format!("Delete {} {what}", ids.len())) {
            println!("Cancelled.");
            return Ok(());
        }
        for id in &ids {
            store.remove(*id)?;
        }
        store::save(path, &store)?;
        println!("🗑️  Deleted {} {what}.", ids.len());
        return Ok(());
    }

    let Some(identifier) = identifier else {
        bail!("give a task id, a name fragment, or one of --completed/--duplicates/--low-impact");
    };
    if let Ok(id) = identifier.trim().parse::<u32>() {
        let Some(task) = store.get(id) else {
            bail!("task with id {id} not found");
        };
        let description = task.description.clone();
        if !force && !confirm(&format!("Delete task #{id}: {description}")) {
            println!("Cancelled.");
            return Ok(());
        }
        store.remove(id)?;
        store::save(path, &store)?;
        println!("🗑️  Deleted task #{id}: {description}");
        return Ok(());
    }

    let matches = suggest::search(&store.tasks, identifier);
    match matches.len() {
        0 => bail!(
            "no tasks match '{identifier}'; try a shorter fragment or 'todoq list -a' for ids"
        ),
        1 => {
            let id = matches[0].task.id;
            let description = matches[0].task.description.clone();
            if !force && !confirm(&format!("Delete task #{id}: {description}")) {
                println!("Cancelled.");
                return Ok(());
            }
            store.remove(id)?;
            store::save(path, &store)?;
            println!("🗑️  Deleted task #{id}: {description}");
            Ok(())
        }
        _ => {
            println!("🔍 {} similar tasks (ranked by relevance):", matches.len());
            for (idx, m) in matches.iter().enumerate() {
                println!(
                    "  {}. #{}: {} ({:.0}% match)",
                    idx + 1,
                    m.task.id,
                    m.task.description,
                    m.score * 100.0
                );
            }
            print!("\nNumber to delete (0 to cancel): ");
            let _ = io::stdout().flush();
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            let choice: usize = line.trim().parse().unwrap_or(0);
            if choice == 0 || choice > matches.len() {
                println!("Cancelled.");
                return Ok(());
            }
            let id = matches[choice - 1].task.id;
            let description = matches[choice - 1].task.description.clone();
            store.remove(id)?;
            store::save(path, &store)?;
            println!("🗑️  Deleted task #{id}: {description}");
            Ok(())
        }
    }
}

fn confirm(message: &str) -> bool {
    print!("❓ {message}? (y/N): ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
