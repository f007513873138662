use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_core::error::AppError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path of the task store file
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: todo add "Buy milk"
    Add {
        text: Option<String>,
    },
    /// List tasks, optionally filtered
    ///
    /// Example: todo list
    /// Example: todo list --filter active
    List {
        #[arg(long, value_name = "FILTER", default_value = "all")]
        filter: String,
    },
    /// Flip a task's completion state
    ///
    /// Example: todo toggle 7c9f…
    Toggle {
        id: String,
    },
    /// Replace a task's text
    ///
    /// Example: todo edit 7c9f… "Buy organic milk"
    Edit {
        id: String,
        new_text: String,
    },
    /// Delete a task
    ///
    /// Example: todo delete 7c9f…
    Delete {
        id: String,
    },
}

/// Commands available inside an interactive session. Editing is a two-step
/// conversation here: `edit` opens the session, `draft` reworks the text,
/// `save` or `cancel` closes it.
#[derive(Parser, Debug)]
#[command(name = "todo", about = "Interactive to-do session", long_about = None)]
pub struct SessionCli {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Add a new task
    Add {
        text: Vec<String>,
    },
    /// Show the task list under the current filter
    List,
    /// Change the filter (all, active or completed)
    Filter {
        filter: String,
    },
    /// Flip a task's completion state
    Toggle {
        id: String,
    },
    /// Start editing a task
    Edit {
        id: String,
    },
    /// Replace the draft text of the open edit
    Draft {
        text: Vec<String>,
    },
    /// Save the open edit
    Save,
    /// Discard the open edit
    Cancel,
    /// Delete a task
    Delete {
        id: String,
    },
}

pub fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

pub fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::validation("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}
