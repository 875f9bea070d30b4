//! Command-line front end for the inspection tracker.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inspection_tracker::api::HttpTaskApi;
use inspection_tracker::render::ConsoleRenderer;
use inspection_tracker::{Config, TaskFilter, TaskId, TaskListViewModel};

/// Browse and claim inspection tasks.
/// The backend is configured through TRACKER_* environment variables.
#[derive(Parser, Debug)]
#[command(name = "inspection-tracker", version, about = "Inspection progress tracker client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Show one page of tasks.
    Tasks {
        /// 1-based page number.
        #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Show tasks whose item name or description contains TEXT.
    Search { text: String },
    /// Show tasks for one site code.
    Site { code: String },
    /// Show tasks with an exact status, e.g. "Field Complete".
    Status { status: String },
    /// Claim a task as TRACKER_INSPECTOR.
    Claim { id: TaskId },
    /// Upload an Excel scope file (.xlsx or .xls).
    Upload { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Using tracker API at {} (page size {})",
        config.api_base_url,
        config.page_size
    );

    let api = Arc::new(HttpTaskApi::from_config(&config)?);
    let renderer = Arc::new(ConsoleRenderer::new());
    let view_model = TaskListViewModel::new(api, renderer, config.page_size);

    let initial = view_model.load_initial().await;
    if initial.used_demo() {
        tracing::warn!("Running with demo data: {:?}", initial);
    }

    match cli.command.unwrap_or(Command::Tasks { page: 1 }) {
        Command::Tasks { page: 1 } => {}
        Command::Tasks { page } => {
            view_model.fetch_page(page).await?;
        }
        Command::Search { text } => view_model.set_filter(TaskFilter::default().search(text)).await,
        Command::Site { code } => view_model.focus_site(code).await,
        Command::Status { status } => {
            view_model
                .set_filter(TaskFilter::default().status(status))
                .await
        }
        Command::Claim { id } => view_model.claim(id, &config.inspector).await?,
        Command::Upload { file } => {
            view_model.upload_scope(&file).await?;
        }
    }

    Ok(())
}
