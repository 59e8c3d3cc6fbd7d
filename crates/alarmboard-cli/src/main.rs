use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "alarmboard", version, about = "Alarm board CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recurrence labels and next occurrences
    Repeat {
        #[command(subcommand)]
        action: commands::repeat::RepeatAction,
    },
    /// Replay a timed input script through the gesture classifier
    Gesture {
        #[command(subcommand)]
        action: commands::gesture::GestureAction,
    },
    /// Pattern setup checks
    Pattern {
        #[command(subcommand)]
        action: commands::pattern::PatternAction,
    },
    /// Seed a board with sample alarms and print it
    Demo {
        /// Reference time, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        now: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("ALARMBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "alarmboard starting");
    let result = match cli.command {
        Commands::Repeat { action } => commands::repeat::run(action),
        Commands::Gesture { action } => commands::gesture::run(action),
        Commands::Pattern { action } => commands::pattern::run(action),
        Commands::Demo { now, json } => commands::demo::run(now.as_deref(), json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
