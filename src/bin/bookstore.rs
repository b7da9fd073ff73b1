use bookstore_queries::cli as prog_cli;
use bookstore_queries::config::{ConfigLayer, load_config};
use bookstore_queries::logger;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "bookstore", version, about = "Run demonstration queries against a MongoDB bookstore collection", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). If omitted, the usual locations are searched.")]
    config: Option<PathBuf>,
    #[arg(long, help = "MongoDB connection string (e.g., mongodb://localhost:27017)")]
    uri: Option<String>,
    #[arg(long, help = "Database name (default plp_bookstore)")]
    db: Option<String>,
    #[arg(long, help = "Collection name (default books)")]
    collection: Option<String>,
    #[arg(long, help = "Output format: human|plain|json")]
    format: Option<String>,
    #[arg(long, help = "Directory for rolling log files; console only if omitted")]
    log_dir: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[arg(long, help = "Exit with status 1 when a command fails (default: 0)")]
    fail_on_error: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    #[command(about = "Run every demonstration query and print the results (default)")]
    Run,
    #[command(about = "Drop the collection and insert the sample books")]
    Seed,
    #[command(about = "List the demonstration steps without connecting")]
    Steps,
    #[command(about = "Print the resolved configuration (password redacted)")]
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let fail_on_error = cli.fail_on_error;
    let layer = ConfigLayer {
        uri: cli.uri,
        database: cli.db,
        collection: cli.collection,
        output: cli.format,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    };
    let cfg = match load_config(layer, cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => return ExitCode::from(prog_cli::finish(Err(e), false, fail_on_error)),
    };
    let logging = match logger::configure_logging(cfg.log_dir.as_deref(), Some(&cfg.log_level), None) {
        Ok(None) => true,
        Ok(Some(dropped)) => {
            log::warn!("file logging disabled, using stderr only: {dropped}");
            true
        }
        Err(e) => {
            eprintln!("warning: {e}");
            false
        }
    };

    let cmd = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => prog_cli::Command::Run,
        Commands::Seed => prog_cli::Command::Seed,
        Commands::Steps => prog_cli::Command::Steps,
        Commands::Config => prog_cli::Command::ShowConfig,
    };
    let result = prog_cli::run(&cfg, cmd).await;
    ExitCode::from(prog_cli::finish(result, logging, fail_on_error))
}
