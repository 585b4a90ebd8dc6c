use clap::{CommandFactory, Parser, Subcommand};
use pomodoro_clock_core::storage::LoggingConfig;
use pomodoro_clock_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomodoro-clock", version, about = "Pomodoro Clock")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive countdown on this terminal (default)
    Run,
    /// Run the countdown on a simulated clock and print the final state
    Simulate(commands::simulate::SimulateArgs),
    /// Print seconds as MM:SS
    Format {
        /// Number of seconds
        secs: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pomodoro_clock_core={level},pomodoro_clock={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    // A broken config is reported only once the subscriber exists.
    let loaded = Config::load();
    let level = match (&cli.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.clone(),
        (None, Err(_)) => LoggingConfig::default().level,
    };
    init_tracing(&level);
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    });

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => commands::run::run(&config),
        Commands::Simulate(args) => commands::simulate::run(args, &config),
        Commands::Format { secs } => {
            println!("{}", pomodoro_clock_core::format_remaining(secs));
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut stdout = std::io::stdout();
            clap_complete::generate(shell, &mut Cli::command(), "pomodoro-clock", &mut stdout);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
