// CLI - command-line argument parsing and handlers
//
// Normal invocation runs the TUI. `--file` converts one document headlessly
// and prints the JSON to stdout; the `config` subcommand manages the config
// file without starting anything.

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};

/// docdrop - terminal client for document-to-JSON conversion
#[derive(Parser)]
#[command(name = "docdrop")]
#[command(version = VERSION)]
#[command(about = "Convert PDF, DOCX, or image files to JSON with a live preview", long_about = None)]
pub struct Cli {
    /// Convert one file headlessly and print the JSON to stdout
    #[arg(long, value_name = "PATH")]
    pub file: Option<std::path::PathBuf>,

    /// Simulate the conversion backend (no server required)
    #[arg(long)]
    pub demo: bool,

    /// Override the conversion endpoint URL
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle subcommands. Returns true if one was handled (exit after).
pub fn handle_command(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path();
            } else if *show {
                handle_config_show();
            } else if *reset {
                handle_config_reset();
            } else {
                println!("Usage: docdrop config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            true
        }
        None => false,
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("upload_url = {:?}", config.upload_url);
    println!("timeout_secs = {}", config.timeout_secs);
    println!("output_dir = {:?}", config.output_dir.display().to_string());
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!("file_dir = {:?}", config.logging.file_dir.display().to_string());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {e}");
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}
