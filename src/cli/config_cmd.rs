use anyhow::Result;
use std::path::Path;

use crate::cli::output::OutputOptions;
use costreport::core::config::{AppConfig, ConfigError};

/// Result of validating a config file on disk.
#[derive(Debug)]
enum CheckOutcome {
    Missing,
    Valid(AppConfig),
    Invalid(Vec<String>),
    Unreadable(ConfigError),
}

/// Write the default config unless a file already exists. Returns whether
/// a file was written.
fn init_at(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        return Ok(false);
    }
    AppConfig::default().save_to(path)?;
    Ok(true)
}

fn check_at(path: &Path) -> CheckOutcome {
    if !path.exists() {
        return CheckOutcome::Missing;
    }
    match AppConfig::load_from(path) {
        Ok(config) => {
            let issues = config.validate();
            if issues.is_empty() {
                CheckOutcome::Valid(config)
            } else {
                CheckOutcome::Invalid(issues)
            }
        }
        Err(e) => CheckOutcome::Unreadable(e),
    }
}

pub fn init(opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    match init_at(&path) {
        Ok(true) => {
            println!("Generated config at {}", path.display());
            if opts.verbose {
                eprintln!("Wrote default settings (format=text, color=auto)");
            }
        }
        Ok(false) => {
            eprintln!("Config file already exists at {}", path.display());
            eprintln!("Remove it first if you want to regenerate.");
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn check(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    match check_at(&path) {
        CheckOutcome::Missing => {
            eprintln!("No config file found at {}", path.display());
            eprintln!("Run `costrep config init` to create one.");
        }
        CheckOutcome::Valid(config) => {
            println!("Config is valid: {}", path.display());
            println!(
                "  Format: {}, color: {}, pretty: {}",
                config.settings.default_format, config.settings.color, config.settings.pretty
            );
        }
        CheckOutcome::Invalid(issues) => {
            eprintln!("Config issues found in {}:", path.display());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
            std::process::exit(1);
        }
        CheckOutcome::Unreadable(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
