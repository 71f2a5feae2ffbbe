mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, diff, edit, resolve, ApplyArgs, DiffArgs, EditArgs, ResolveArgs};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Paperclip components - resolve component instances and fold edits back
#[derive(Parser, Debug)]
#[command(name = "paperclip-components")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved tree of a component
    Resolve(ResolveArgs),

    /// Diff two resolved trees
    Diff(DiffArgs),

    /// Fold a selection's pending diff into its component
    Apply(ApplyArgs),

    /// Run canvas actions against a component and commit the result
    Edit(EditArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();
    let config = Config::load(&cwd)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Resolve(args) => resolve(args, &config),
        Command::Diff(args) => diff(args, &config),
        Command::Apply(args) => apply(args, &config),
        Command::Edit(args) => edit(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
