//! CLI frontend for the Inkline branching-narrative engine.

mod commands;
mod presenter;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(
    name = "inkline",
    about = "Inkline: play branching stories in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story interactively
    Play {
        /// Story JSON file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,

        /// Milliseconds per revealed character
        #[arg(long, default_value = "30")]
        speed: u64,

        /// Show text at once instead of revealing it
        #[arg(long)]
        instant: bool,

        /// Do not clamp the time counter to 0-100
        #[arg(long)]
        unclamped: bool,

        /// Open on this scene instead of the story's start
        #[arg(long)]
        scene: Option<String>,
    },

    /// Validate a story graph and report unreachable scenes
    Check {
        /// Story JSON file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// List every scene of a story
    Scenes {
        /// Story JSON file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("INKLINE_LOG").unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            speed,
            instant,
            unclamped,
            scene,
        } => commands::play::run(
            story.as_deref(),
            commands::play::PlayOptions {
                speed,
                instant,
                unclamped,
                scene,
            },
        ),
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Scenes { story } => commands::scenes::run(story.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
