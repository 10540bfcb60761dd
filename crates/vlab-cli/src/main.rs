//! vlab CLI
//!
//! Command-line interface for the lab simulators

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vlab")]
#[command(about = "vlab - natural-language control of five lab simulators", long_about = None)]
struct Cli {
    #[command(flatten)]
    session: commands::SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one or more commands in order
    Run(commands::run::RunArgs),
    /// Run a file of commands, one per line
    Script(commands::script::ScriptArgs),
    /// Read commands from stdin interactively
    Repl,
    /// List named presets
    Presets,
    /// Show an example command per domain
    Examples(commands::examples::ExamplesArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(&cli.session, args),
        Commands::Script(args) => commands::script::execute(&cli.session, args),
        Commands::Repl => commands::repl::execute(&cli.session),
        Commands::Presets => commands::presets::execute(&cli.session),
        Commands::Examples(args) => commands::examples::execute(&cli.session, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
