use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use crossterm::tty::IsTty;
use std::io::{self, Write};
use std::process::ExitCode;
use todo::commands::*;
use todo::config::Settings;
use todo::error::{Result, TodoError};
use todo::repository::TaskRepository;
use todo::storage::{self, DocumentStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "A simple cli programme to manage your tasks", long_about = None)]
struct Cli {
    /// Connection string of the task store, e.g. file:///tmp/tasks
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task to the list
    #[command(visible_alias = "a")]
    Add {
        /// Task name (quoted if it has spaces)
        name: String,
        /// Free-text description
        description: Option<String>,
    },
    /// Remove the first task with the given name
    #[command(visible_alias = "d")]
    Delete {
        name: String,
    },
    /// List all tasks
    List {
        /// Show description, creation time and status in a table
        #[arg(short, long)]
        long: bool,
    },
    /// Mark the first task with the given name as complete
    #[command(visible_alias = "c")]
    Complete {
        name: String,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let color = io::stdout().is_tty();
    let mut out = io::stdout().lock();
    let db = cli.db;

    let result = match cli.command {
        Some(Commands::Completions { shell }) => print_completions(&shell, &mut out),
        None => open_repository(db).and_then(|_| cmd_greet(&mut out)),
        Some(Commands::Add { name, description }) => {
            open_repository(db).and_then(|repo| cmd_add(&repo, &name, description, &mut out))
        }
        Some(Commands::Delete { name }) => {
            open_repository(db).and_then(|repo| cmd_delete(&repo, &name, &mut out))
        }
        Some(Commands::List { long }) => {
            open_repository(db).and_then(|repo| cmd_list(&repo, long, color, &mut out))
        }
        Some(Commands::Complete { name }) => {
            open_repository(db).and_then(|repo| cmd_complete(&repo, &name, &mut out))
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads settings, starts logging and connects to the configured store.
fn open_repository(db: Option<String>) -> Result<TaskRepository<Box<dyn DocumentStore>>> {
    let settings = Settings::load(db)?;
    init_logging(&settings.log);

    let store = storage::connect(&settings.uri, &settings.database)?;
    Ok(TaskRepository::new(store))
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(todo::config::DEFAULT_LOG));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_completions(shell: &str, out: &mut impl Write) -> Result<()> {
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => return Err(TodoError::Usage(format!("unsupported shell: {}", shell))),
    };
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "todo", out);
    Ok(())
}
