use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "skillpath", version, about = "SkillPath CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a navigation session with JSON actions read from stdin
    Session(commands::session::SessionArgs),
    /// Topic quiz scoring
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Job-readiness assessment scoring
    Job {
        #[command(subcommand)]
        action: commands::job::JobAction,
    },
    /// Learning path generation
    Path {
        #[command(subcommand)]
        action: commands::path::PathAction,
    },
    /// Skill roadmaps and progress
    Roadmap {
        #[command(subcommand)]
        action: commands::roadmap::RoadmapAction,
    },
    /// Dashboard course listing
    Courses {
        #[command(subcommand)]
        action: commands::courses::CoursesAction,
    },
    /// Topic catalog
    Topics {
        #[command(subcommand)]
        action: commands::topics::TopicsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn setup_trace() {
    let filter = EnvFilter::try_from_env("SKILLPATH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    setup_trace();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session(args) => commands::session::run(args),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Job { action } => commands::job::run(action),
        Commands::Path { action } => commands::path::run(action),
        Commands::Roadmap { action } => commands::roadmap::run(action),
        Commands::Courses { action } => commands::courses::run(action),
        Commands::Topics { action } => commands::topics::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "skillpath", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
