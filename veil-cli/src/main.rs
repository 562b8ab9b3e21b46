//! Veil CLI
//!
//! Terminal-first interface for the veil ceremony.

mod commands;
mod config;
mod logging;
mod output;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "veil")]
#[command(author = "LogicCrafter")]
#[command(version)]
#[command(about = "Veil - random veils, aligned patterns, distilled words", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ceremony
    Run(commands::run::RunArgs),

    /// Print the share link for the stored settings
    Share(commands::share::ShareArgs),

    /// Show the settings a share link carries
    Decode(commands::decode::DecodeArgs),

    /// Render the utterance log as words
    Words(commands::words::WordsArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Share(args) => commands::share::run(args),
        Commands::Decode(args) => commands::decode::run(args),
        Commands::Words(args) => commands::words::run(args),
    };

    std::process::exit(exit_code);
}
