use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use std::env;
use std::str::FromStr;

use crate::config;
use crate::models::{StatusFilter, Task, TaskStatus, board, quadrant, task};
use crate::store::TaskStore;

/// Handle CLI commands.
/// Returns true when the TUI should start, false when the command line was
/// handled here.
pub fn handle_cli() -> Result<bool> {
    let args: Vec<String> = env::args().collect();

    // No arguments: straight into the TUI.
    if args.len() < 2 {
        return Ok(true);
    }

    match args[1].as_str() {
        "add" => {
            if args.len() < 3 {
                eprintln!("Usage: ebn add <title> [--due YYYY-MM-DD] [--priority N] [--desc TEXT] [--status STATUS]");
                std::process::exit(1);
            }
            run(cli_add(&args[2..]))
        }
        "list" => run(cli_list(&args[2..])),
        "show" => {
            if args.len() < 3 {
                eprintln!("Usage: ebn show <id>");
                std::process::exit(1);
            }
            run(cli_show(&args[2]))
        }
        "move" => {
            if args.len() < 4 {
                eprintln!("Usage: ebn move <id> <status>");
                std::process::exit(1);
            }
            run(cli_move(&args[2], &args[3]))
        }
        "delete" => {
            if args.len() < 3 {
                eprintln!("Usage: ebn delete <id>");
                std::process::exit(1);
            }
            run(cli_delete(&args[2]))
        }
        "matrix" => run(cli_matrix(&args[2..])),
        "config" => {
            if args.len() < 3 {
                config::show_config()?;
            } else {
                match args[2].as_str() {
                    "show" => config::show_config()?,
                    "threshold" => {
                        let days = args
                            .get(3)
                            .and_then(|s| s.parse::<u32>().ok())
                            .unwrap_or_else(|| {
                                eprintln!("Usage: ebn config threshold <days>");
                                std::process::exit(1);
                            });
                        config::set_days_threshold(days)?;
                    }
                    _ => {
                        eprintln!("Unknown config option: {}", args[2]);
                        eprintln!("Available: show, threshold");
                        std::process::exit(1);
                    }
                }
            }
            Ok(false)
        }
        "--help" | "-h" | "help" => {
            print_help();
            Ok(false)
        }
        "--version" | "-V" | "-v" => {
            print_version();
            Ok(false)
        }
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            eprintln!("Use 'ebn --help' for usage");
            std::process::exit(1);
        }
    }
}

/// Print a handler's error the standard way and always stay out of the TUI.
fn run(result: Result<(), String>) -> Result<bool> {
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(false)
}

fn open_store() -> Result<TaskStore, String> {
    let config = config::load_config().map_err(|e| e.to_string())?;
    TaskStore::open(config::data_file_path(&config)).map_err(|e| e.to_string())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|s| s == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_status(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_str(s)
}

/// Resolve a task by full id or unique id prefix.
fn resolve_id<'a>(store: &'a TaskStore, needle: &str) -> Result<&'a Task, String> {
    if let Some(task) = store.get(needle) {
        return Ok(task);
    }
    let matches: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(needle))
        .collect();
    match matches.len() {
        0 => Err(format!("No task with id '{}'", needle)),
        1 => Ok(matches[0]),
        n => Err(format!("Id prefix '{}' is ambiguous ({} matches)", needle, n)),
    }
}

// ============================================================================
// Task Commands
// ============================================================================

fn cli_add(args: &[String]) -> Result<(), String> {
    // Everything before the first flag is the title.
    let flag_start = args
        .iter()
        .position(|a| a.starts_with("--"))
        .unwrap_or(args.len());
    let title = args[..flag_start].join(" ");
    let flags = &args[flag_start..];

    let due = parse_flag(flags, "--due")
        .unwrap_or_else(|| Local::now().date_naive().format(task::DATE_FORMAT).to_string());
    let priority = parse_flag(flags, "--priority").unwrap_or_else(|| "5".to_string());
    let description = parse_flag(flags, "--desc").unwrap_or_default();
    let status = match parse_flag(flags, "--status") {
        Some(s) => parse_status(&s)?,
        None => TaskStatus::Todo,
    };

    let draft = task::draft_from_input(&title, &description, &priority, &due, status)
        .map_err(|errors| {
            let mut msg = String::from("Invalid task:");
            for e in &errors {
                msg.push_str(&format!("\n  {}", e));
            }
            msg
        })?;

    let mut store = open_store()?;
    let task = store.add(draft).map_err(|e| e.to_string())?;

    println!("✓ Created \"{}\"", task.title);
    println!("  id: {}", task.id);
    println!("  due {}  priority {}  {}", task.due_date, task.priority, task.status);

    Ok(())
}

fn cli_list(args: &[String]) -> Result<(), String> {
    let store = open_store()?;

    let tasks: Vec<&Task> = if let Some(s) = parse_flag(args, "--status") {
        store.by_status(parse_status(&s)?)
    } else if let Some(n) = parse_flag(args, "--due-within") {
        let days: u32 = n
            .parse()
            .map_err(|_| format!("--due-within expects a number of days, got '{}'", n))?;
        let horizon = Local::now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        store.due_on_or_before(horizon)
    } else if let Some(p) = parse_flag(args, "--min-priority") {
        let priority: u8 = p
            .parse()
            .map_err(|_| format!("--min-priority expects a number, got '{}'", p))?;
        store.with_min_priority(priority)
    } else if args.iter().any(|a| a == "--done") {
        store.completed()
    } else {
        store.tasks().iter().collect()
    };

    if tasks.is_empty() {
        println!("No tasks found.");
        return Ok(());
    }

    println!("ID        PRI  DUE         STATUS       TITLE");
    println!("--------  ---  ----------  -----------  -----------------------------------");
    for task in tasks {
        println!(
            "{:<8}  {:<3}  {}  {:<11}  {}",
            short_id(&task.id),
            task.priority,
            task.due_date,
            task.status,
            truncate(&task.title, 35)
        );
    }

    Ok(())
}

fn cli_show(id: &str) -> Result<(), String> {
    let store = open_store()?;
    let task = resolve_id(&store, id)?;

    println!("Task {}", task.id);
    println!("Title:    {}", task.title);
    println!("Status:   {}", task.status);
    println!("Priority: {}", task.priority);
    println!("Due:      {}", task.due_date);
    println!("Created:  {}", task.created_at.to_rfc3339());
    println!("Updated:  {}", task.updated_at.to_rfc3339());
    if !task.description.is_empty() {
        println!("\n{}", task.description);
    }

    Ok(())
}

fn cli_move(id: &str, status: &str) -> Result<(), String> {
    let target = parse_status(status)?;
    let mut store = open_store()?;
    let id = resolve_id(&store, id)?.id.clone();

    let planned = board::resolve_move(store.tasks(), &id, target).cloned();
    match planned {
        Some(mut task) => {
            task.status = target;
            let task = store.update(task).map_err(|e| e.to_string())?;
            println!("✓ Moved \"{}\" to {}", task.title, task.status);
        }
        None => println!("Already in {}, nothing to do", target),
    }

    Ok(())
}

fn cli_delete(id: &str) -> Result<(), String> {
    let mut store = open_store()?;
    let task = resolve_id(&store, id)?;
    let (id, title) = (task.id.clone(), task.title.clone());

    store.delete(&id).map_err(|e| e.to_string())?;
    println!("✓ Deleted \"{}\"", title);

    Ok(())
}

fn cli_matrix(args: &[String]) -> Result<(), String> {
    let config = config::load_config().map_err(|e| e.to_string())?;
    let store = TaskStore::open(config::data_file_path(&config)).map_err(|e| e.to_string())?;

    let days = match parse_flag(args, "--days") {
        Some(n) => n
            .parse::<u32>()
            .map_err(|_| format!("--days expects a non-negative number, got '{}'", n))?,
        None => config.days_threshold,
    };

    let quadrants = quadrant::partition(store.tasks(), &StatusFilter::none(), days);

    println!("Urgent if due within {} day(s)\n", days);
    for (title, tasks) in quadrants.titled() {
        println!("{} ({})", title, tasks.len());
        if tasks.is_empty() {
            println!("  (none)");
        }
        for task in tasks {
            println!(
                "  {:<8}  p{:<2}  due {}  {}",
                short_id(&task.id),
                task.priority,
                task.due_date,
                truncate(&task.title, 40)
            );
        }
        println!();
    }

    Ok(())
}

// ============================================================================
// Output helpers
// ============================================================================

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    }
}

/// Print help.
fn print_help() {
    println!("eisenban (ebn) - terminal task manager\n");
    println!("Usage:");
    println!("  ebn                     start the TUI");
    println!("  ebn <command> [args]    run a CLI command");
    println!("  ebn --help              show this help");
    println!("  ebn --version           show the version\n");

    println!("Commands:");
    println!("  add <title> [--due YYYY-MM-DD] [--priority N] [--desc TEXT] [--status STATUS]");
    println!("                          create a task (defaults: due today, priority 5, todo)");
    println!("  list [--status S | --due-within N | --min-priority N | --done]");
    println!("                          list tasks, optionally filtered");
    println!("  show <id>               show one task (id prefixes work)");
    println!("  move <id> <status>      move a task to todo, in_progress or done");
    println!("  delete <id>             delete a task");
    println!("  matrix [--days N]       print the Eisenhower quadrants");
    println!("  config [show]           show configuration");
    println!("  config threshold <N>    set the default urgency threshold\n");

    println!("Examples:");
    println!("  ebn add Fix the gutters --priority 8 --due 2026-09-01");
    println!("  ebn list --status todo");
    println!("  ebn list --due-within 7");
    println!("  ebn matrix --days 0");
    println!("  ebn move 3f2a in_progress");
}

/// Print version.
fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const NAME: &str = env!("CARGO_PKG_NAME");
    println!("{} {}", NAME, VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskDraft;
    use tempfile::TempDir;

    #[test]
    fn test_parse_flag() {
        let args: Vec<String> = ["--due", "2026-09-01", "--priority", "8"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(parse_flag(&args, "--due").as_deref(), Some("2026-09-01"));
        assert_eq!(parse_flag(&args, "--priority").as_deref(), Some("8"));
        assert_eq!(parse_flag(&args, "--status"), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long task title", 10), "a very ...");
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = TaskStore::open(dir.path().join("tasks.json")).unwrap();
        let task = store
            .add(TaskDraft {
                title: "a".to_string(),
                description: String::new(),
                priority: 5,
                due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                status: TaskStatus::Todo,
            })
            .unwrap();

        let by_full = resolve_id(&store, &task.id).unwrap();
        assert_eq!(by_full.id, task.id);

        let by_prefix = resolve_id(&store, &task.id[..8]).unwrap();
        assert_eq!(by_prefix.id, task.id);

        assert!(resolve_id(&store, "zzzzzz").is_err());
    }

    #[test]
    fn test_resolve_id_rejects_ambiguous_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = TaskStore::open(dir.path().join("tasks.json")).unwrap();
        for title in ["a", "b"] {
            store
                .add(TaskDraft {
                    title: title.to_string(),
                    description: String::new(),
                    priority: 5,
                    due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
                    status: TaskStatus::Todo,
                })
                .unwrap();
        }

        // Every v4 uuid shares the empty prefix.
        let err = resolve_id(&store, "").unwrap_err();
        assert!(err.contains("ambiguous"));
    }
}
