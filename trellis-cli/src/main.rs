mod commands;

use clap::{Parser, Subcommand};
use commands::{generate, routes};

#[derive(Parser)]
#[command(
    name = "trellis",
    version,
    about = "Trellis CLI - scaffold and inspect route blueprints"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new route blueprint
    Generate {
        /// Blueprint name, optionally path-qualified (e.g. admin/DashboardBlueprint)
        name: String,
        /// Identifier override; defaults to the snake_cased name minus a "Blueprint" suffix
        #[arg(long)]
        identifier: Option<String>,
    },
    /// List blueprints declared in the blueprint directory
    Routes,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { name, identifier } => generate::run(&name, identifier.as_deref()),
        Commands::Routes => routes::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
