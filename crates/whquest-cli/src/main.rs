use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "whquest", version, about = "Working Holiday quest tracker")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall progress, rank, streak and next quest
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every stage with its progress and lock state
    Stages {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the quests of one stage
    Stage {
        /// Stage ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Complete or undo quests
    Quest {
        #[command(subcommand)]
        action: commands::quest::QuestAction,
    },
    /// Achievement list
    Achievements {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank ladder
    Ranks {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Planned departure date
    Departure {
        #[command(subcommand)]
        action: commands::departure::DepartureAction,
    },
    /// Wipe progress, XP, achievements and streak
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
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

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Status { json } => commands::status::run(json),
        Commands::Stages { json } => commands::stage::list(json),
        Commands::Stage { id, json } => commands::stage::show(id, json),
        Commands::Quest { action } => commands::quest::run(action),
        Commands::Achievements { json } => commands::game::achievements(json),
        Commands::Ranks { json } => commands::game::ranks(json),
        Commands::Departure { action } => commands::departure::run(action),
        Commands::Reset { yes } => commands::reset::run(yes),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "whquest", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
