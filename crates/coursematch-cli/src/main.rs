use clap::{CommandFactory, Parser, Subcommand};
use coursematch_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "coursematch",
    version,
    about = "Coursematch CLI - course recommendations from your academic profile and personality"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step 1: subjects, grades, hobbies and interests
    Academic {
        #[command(subcommand)]
        action: commands::academic::AcademicAction,
    },
    /// Step 2: personality questionnaire
    Personality {
        #[command(subcommand)]
        action: commands::personality::PersonalityAction,
    },
    /// Step 3: course recommendations
    Results {
        #[command(subcommand)]
        action: commands::results::ResultsAction,
    },
    /// Show the current wizard state
    Status {
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether the classification service is reachable
    Health {
        #[arg(long)]
        json: bool,
    },
    /// Toggle the debug panel
    Debug,
    /// Past classifications
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let fallback = Config::load_or_default().logging.level;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Academic { action } => commands::academic::run(action),
        Commands::Personality { action } => commands::personality::run(action),
        Commands::Results { action } => commands::results::run(action),
        Commands::Status { json } => commands::status::run(json),
        Commands::Health { json } => commands::status::health(json),
        Commands::Debug => commands::status::toggle_debug(),
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
