//! Folio: portfolio project catalog CLI.
//!
//! # Usage
//!
//! ```text
//! folio init [--endpoint URL [--api-key KEY] | --store PATH]
//! folio list [--json]
//! folio show [--templates DIR]
//! folio add --title T --description D [--tech X]... [--image-url U] [--github U] [--live U]
//! folio edit <ID> [--title T] [--tech-add X]... [--tech-remove X]... [--preview]
//! folio delete <ID> [--yes]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    add::AddArgs, delete::DeleteArgs, edit::EditArgs, init::InitArgs, list::ListArgs,
    show::ShowArgs, BackendArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Maintain a portfolio project catalog",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the backend selection to ~/.folio/config.yaml.
    Init(InitArgs),

    /// List catalog records.
    List(ListArgs),

    /// Render the visitor-facing project list.
    Show(ShowArgs),

    /// Create a project.
    Add(AddArgs),

    /// Change an existing project.
    Edit(EditArgs),

    /// Delete a project after confirmation.
    Delete(DeleteArgs),
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    match cli.command {
        Commands::Init(args) => args.run(&cli.backend),
        Commands::List(args) => args.run(&cli.backend),
        Commands::Show(args) => args.run(&cli.backend),
        Commands::Add(args) => args.run(&cli.backend),
        Commands::Edit(args) => args.run(&cli.backend),
        Commands::Delete(args) => args.run(&cli.backend),
    }
}
