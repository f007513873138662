//! REST server for the to-do list. Tasks live in memory by default; pass
//! `--store <path>` (or set `TODO_STORE_PATH`) to persist them to a JSON
//! file instead.

use std::path::PathBuf;

use clap::Parser;
use todo_core::error::AppError;
use todo_core::service::TaskService;
use todo_core::storage::{JsonStore, MemStore, TaskStore};
use todo_server::api::{AppState, router};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "TODO_ADDR", default_value = "127.0.0.1:3000")]
    addr: String,

    /// Persist tasks to this JSON file instead of keeping them in memory
    #[arg(long, env = "TODO_STORE_PATH", value_name = "PATH")]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Tracing is opt-in via RUST_LOG; default to request-level info.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.store {
        Some(path) => {
            // An unreadable store file is a fatal startup condition, not a
            // per-request error.
            let store = JsonStore::open(path)?;
            tracing::info!(path = %store.path().display(), "using file-backed store");
            serve(&cli.addr, store).await
        }
        None => serve(&cli.addr, MemStore::new()).await,
    }
}

async fn serve<S>(addr: &str, store: S) -> Result<(), AppError>
where
    S: TaskStore + Send + 'static,
{
    let app = router(AppState::new(TaskService::new(store)));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::unavailable(err.to_string()))?;

    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .await
        .map_err(|err| AppError::unavailable(err.to_string()))
}
