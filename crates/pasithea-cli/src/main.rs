#![forbid(unsafe_code)]

mod board;
mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pasithea: a shared issue board for humans and agents",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize a pasithea board",
        long_about = "Initialize a pasithea board in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize with the default project name\n    pas init\n\n    # Name the board\n    pas init --name \"Orchard\""
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Create an issue (local edit)",
        long_about = "Create a new issue as a local edit, pushed to the canonical side.",
        after_help = "EXAMPLES:\n    # Create a todo issue\n    pas create --title \"Fix login timeout\"\n\n    # Create with fields\n    pas create --title \"Set up CI\" --priority high --label infra\n\n    # Emit machine-readable output\n    pas create --title \"Fix login timeout\" --json"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Read",
        about = "List issues",
        long_about = "List issues, optionally filtered by status column.",
        after_help = "EXAMPLES:\n    # Whole board\n    pas list\n\n    # One column\n    pas list --status in-progress\n\n    # Emit machine-readable output\n    pas list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one issue",
        long_about = "Show full details for a single issue by ID.",
        after_help = "EXAMPLES:\n    # Show an issue\n    pas show ISS-198F3C2A1B0-0\n\n    # Emit machine-readable output\n    pas show ISS-198F3C2A1B0-0 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Update an issue's fields (local edit)",
        long_about = "Patch an issue as a local edit; omitted fields are left untouched.",
        after_help = "EXAMPLES:\n    # Reprioritize\n    pas update ISS-198F3C2A1B0-0 --priority critical\n\n    # Retitle and relabel\n    pas update ISS-198F3C2A1B0-0 --title \"New title\" --label backend"
    )]
    Update(cmd::update::UpdateArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Delete an issue (local edit)",
        after_help = "EXAMPLES:\n    # Delete an issue\n    pas delete ISS-198F3C2A1B0-0"
    )]
    Delete(cmd::delete::DeleteArgs),

    #[command(
        next_help_heading = "Agent",
        about = "Move an issue to a status column (via the tool contract)",
        long_about = "Move an issue by invoking the move_issue tool against the canonical session.",
        after_help = "EXAMPLES:\n    # Start work\n    pas move ISS-198F3C2A1B0-0 in-progress"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Agent",
        about = "Invoke a tool by name with JSON arguments",
        long_about = "Invoke any contract tool the way the agent does: by name, with JSON arguments.",
        after_help = "EXAMPLES:\n    # Read the board\n    pas call get_issues\n\n    # Create an issue\n    pas call create_issue --args '{\"title\": \"Fix bug\", \"priority\": \"high\"}'\n\n    # Domain errors come back as replies, not failures\n    pas call delete_issue --args '{\"id\": \"ISS-NOPE\"}'"
    )]
    Call(cmd::call::CallArgs),

    #[command(
        next_help_heading = "Agent",
        about = "Print the tool schemas",
        long_about = "Print the declared tool schemas and the agent usage preamble.",
        after_help = "EXAMPLES:\n    # Machine-readable contract\n    pas schema --json"
    )]
    Schema(cmd::schema::SchemaArgs),

    #[command(
        next_help_heading = "Read",
        about = "Board summary and environment checks",
        after_help = "EXAMPLES:\n    # Column counts plus credential/replica checks\n    pas status"
    )]
    Status(cmd::status::StatusArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PASITHEA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "pasithea=debug,info"
        } else {
            "pasithea=info,warn"
        })
    });

    let format = env::var("PASITHEA_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mode = output::resolve_output_mode(cli.json);
    let root = env::current_dir()?;

    match &cli.command {
        Commands::Init(args) => cmd::init::run(args, mode, &root),
        Commands::Create(args) => cmd::create::run(args, mode, &root),
        Commands::List(args) => cmd::list::run(args, mode, &root),
        Commands::Show(args) => cmd::show::run(args, mode, &root),
        Commands::Update(args) => cmd::update::run(args, mode, &root),
        Commands::Delete(args) => cmd::delete::run(args, mode, &root),
        Commands::Move(args) => cmd::move_cmd::run(args, mode, &root),
        Commands::Call(args) => cmd::call::run(args, mode, &root),
        Commands::Schema(args) => cmd::schema::run(args, mode),
        Commands::Status(args) => cmd::status::run(args, mode, &root),
    }
}
