mod commands;
mod config;
mod script;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{render, replay, tree, RenderArgs, ReplayArgs, TreeArgs};
use tracing_subscriber::EnvFilter;

/// Livedoc CLI - render markup and replay in-place edits
#[derive(Parser, Debug)]
#[command(name = "livedoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log session activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a markup file and print it as HTML
    Render(RenderArgs),

    /// Print the node tree of a markup file as JSON
    Tree(TreeArgs),

    /// Apply a script of edits to a markup file and print the result
    Replay(ReplayArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match command {
        Command::Render(args) => render(args, &cwd),
        Command::Tree(args) => tree(args, &cwd),
        Command::Replay(args) => replay(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
