use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use qsoparty::config::ContestConfig;
use qsoparty::contest::Contest;
use qsoparty::reference::ReferenceData;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "QSO party log checking and scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Local location codes, one per line
    #[arg(global = true, long, default_value = "data/reference/local_codes.txt")]
    local: String,

    /// Regional (state/province) codes, one per line
    #[arg(
        global = true,
        long,
        default_value = "data/reference/regional_codes.txt"
    )]
    regional: String,

    /// JSON contest rules; explicit command line flags still win
    #[arg(global = true, long)]
    rules: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check every log in a directory and print its validation report
    Validate(cmd::validate::ValidateArgs),
    /// Validate, prepare and score every log, then print the standings
    Score(cmd::score::ScoreArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("Loading reference data: {} / {}", cli.local, cli.regional);
    let refs = ReferenceData::load(&cli.local, &cli.regional).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let cli_config = match &cli.command {
        Commands::Validate(args) => &args.config,
        Commands::Score(args) => &args.config,
    };
    let config = resolve_config(cli_config, cli.rules.as_deref(), &matches);

    let contest = Contest::new(&config, refs).unwrap_or_else(|e| {
        error!("Invalid contest rules: {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Validate(args) => cmd::validate::run(&args, &contest),
        Commands::Score(args) => cmd::score::run(&args, &contest),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

/// File rules (when given) overlaid with the flags typed on the command line.
fn resolve_config(cli_config: &ContestConfig, path: Option<&str>, matches: &ArgMatches) -> ContestConfig {
    let Some(path) = path else {
        return cli_config.clone();
    };

    let mut config = ContestConfig::load_from_file(path).unwrap_or_else(|e| {
        error!("Failed to load rules from {}: {}", path, e);
        process::exit(1);
    });

    if let Some((_, sub_matches)) = matches.subcommand() {
        config.merge_from_cli(cli_config, sub_matches);
    }
    config
}
