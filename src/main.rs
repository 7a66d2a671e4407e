mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use costreport::core::config::AppConfig;

#[derive(Parser)]
#[command(name = "costrep", about = "Build infrastructure cost report tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a report and display it
    Show {
        /// Report file ("-" for stdin)
        file: PathBuf,

        /// Expand accounts, services, line items, projects and distros
        #[arg(short, long)]
        all: bool,
    },
    /// Validate one or more report files
    Check {
        /// Report files ("-" for stdin)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            if cli.verbose {
                eprintln!("Ignoring config: {}", e);
            }
            AppConfig::default()
        }
    };

    let output_opts = cli::output::OutputOptions::resolve(
        &config.settings,
        cli.format.as_deref(),
        cli.json,
        cli.pretty,
        cli.no_color,
        cli.verbose,
    );

    match cli.command {
        Commands::Show { file, all } => cli::report_cmd::show(&file, all, &output_opts)?,
        Commands::Check { files } => cli::report_cmd::check(&files, &output_opts)?,
        Commands::Config { action } => match action {
            ConfigAction::Init => cli::config_cmd::init(&output_opts)?,
            ConfigAction::Check => cli::config_cmd::check(&output_opts)?,
        },
    }

    Ok(())
}
