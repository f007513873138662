use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use todo_cli::cli::{
    Cli, Command, SessionCli, SessionCommand, normalize_parse_error, split_command_line,
};
use todo_core::error::AppError;
use todo_core::model::Task;
use todo_core::service::TaskService;
use todo_core::storage::{JsonStore, default_store_path};
use todo_core::view::{Filter, TaskView};

#[derive(Tabled)]
struct TaskRow {
    id: String,
    text: String,
    status: &'static str,
    created: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            status: if task.completed { "completed" } else { "active" },
            created: task.created_at.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn open_view(store: Option<PathBuf>) -> Result<TaskView<JsonStore>, AppError> {
    let path = match store {
        Some(path) => path,
        None => default_store_path()?,
    };
    let store = JsonStore::open(path)?;
    TaskView::open(TaskService::new(store))
}

fn print_tasks_plain(view: &TaskView<JsonStore>) {
    let rows: Vec<TaskRow> = view
        .filtered_tasks()
        .into_iter()
        .map(TaskRow::from)
        .collect();

    if rows.is_empty() {
        println!("{}", view.empty_message());
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn print_tasks_json(view: &TaskView<JsonStore>) -> Result<(), AppError> {
    let tasks = view.filtered_tasks();
    let json =
        serde_json::to_string(&tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let json =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let mut view = open_view(cli.store)?;

    match cli.command {
        Command::Add { text } => {
            let added = view.add(text.as_deref().unwrap_or(""))?;
            let task = added.ok_or_else(|| AppError::validation("text is required"))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} ({})", task.text, task.id);
            }
        }
        Command::List { filter } => {
            view.set_filter(filter.parse::<Filter>()?);
            if cli.json {
                print_tasks_json(&view)?;
            } else {
                print_tasks_plain(&view);
            }
        }
        Command::Toggle { id } => {
            let task = view.toggle(&id)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                let state = if task.completed { "completed" } else { "active" };
                println!("Toggled task: {} ({}) -> {}", task.text, task.id, state);
            }
        }
        Command::Edit { id, new_text } => {
            view.start_editing(&id)?;
            view.edit_draft(&new_text);
            let saved = view.save_edit()?;
            let task = saved.ok_or_else(|| AppError::validation("text is required"))?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated task: {} ({})", task.text, task.id);
            }
        }
        Command::Delete { id } => {
            view.delete(&id)?;
            if cli.json {
                println!("{}", serde_json::json!({ "deleted": id }));
            } else {
                println!("Deleted task: {id}");
            }
        }
    }

    Ok(())
}

fn run_session_command(
    view: &mut TaskView<JsonStore>,
    command: SessionCommand,
) -> Result<(), AppError> {
    match command {
        SessionCommand::Add { text } => {
            match view.add(&text.join(" "))? {
                Some(task) => println!("Added task: {} ({})", task.text, task.id),
                None => return Err(AppError::validation("text is required")),
            }
        }
        SessionCommand::List => print_tasks_plain(view),
        SessionCommand::Filter { filter } => {
            view.set_filter(filter.parse::<Filter>()?);
            println!("Filter: {}", view.filter().label());
        }
        SessionCommand::Toggle { id } => {
            let task = view.toggle(&id)?;
            let state = if task.completed { "completed" } else { "active" };
            println!("Toggled task: {} ({}) -> {}", task.text, task.id, state);
        }
        SessionCommand::Edit { id } => {
            view.start_editing(&id)?;
            let draft = view.editing_draft().unwrap_or_default();
            println!("Editing {id}: {draft}");
        }
        SessionCommand::Draft { text } => {
            if view.editing_id().is_none() {
                return Err(AppError::validation("no edit in progress"));
            }
            view.edit_draft(&text.join(" "));
            let draft = view.editing_draft().unwrap_or_default();
            println!("Draft: {draft}");
        }
        SessionCommand::Save => {
            if view.editing_id().is_none() {
                return Err(AppError::validation("no edit in progress"));
            }
            match view.save_edit()? {
                Some(task) => println!("Updated task: {} ({})", task.text, task.id),
                None => return Err(AppError::validation("text is required")),
            }
        }
        SessionCommand::Cancel => {
            view.cancel_edit();
            println!("Edit cancelled");
        }
        SessionCommand::Delete { id } => {
            view.delete(&id)?;
            println!("Deleted task: {id}");
        }
    }

    Ok(())
}

fn print_session_help() {
    let mut cmd = SessionCli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive(store: Option<PathBuf>) -> Result<(), AppError> {
    let mut view = open_view(store)?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::unavailable(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_session_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("todo".to_string());
        argv.extend(args);

        let session = match SessionCli::try_parse_from(argv) {
            Ok(session) => session,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_session_command(&mut view, session.command) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive(None) {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
