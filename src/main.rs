// docdrop - terminal client for document-to-JSON conversion
//
// Drop (or pick) a PDF, DOCX, or image file; it is uploaded to a remote
// conversion service and the returned JSON is typed into a live preview,
// then saved on demand as <basename>.json.
//
// Architecture:
// - Intake (src/intake.rs): drag/drop/picker state machine feeding one
//   "file selected" signal
// - Upload lifecycle (src/convert.rs): single-flight multipart POST with
//   latest-submission-wins generation tokens
// - Typing scheduler (src/typing/): placeholder and result reveal
//   animations, mutually exclusive by construction
// - TUI (src/tui/): ratatui shell; the event loop is the single writer of
//   application state
// - Events (src/events.rs): mpsc channel from the conversion worker to the
//   TUI

mod cli;
mod config;
mod convert;
mod demo;
mod download;
mod events;
mod intake;
mod logging;
mod payload;
mod tui;
mod typing;

use anyhow::Result;
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if cli::handle_command(&cli) {
        return Ok(());
    }

    // Ensure the config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(url) = cli.url.clone() {
        config.upload_url = url;
    }
    if cli.demo {
        config.demo_mode = true;
    }
    if cli.file.is_some() {
        // One-shot conversion runs without the TUI
        config.enable_tui = false;
    }

    let log_buffer = LogBuffer::new();

    // Logging precedence: RUST_LOG env var > config file > default "info".
    // In TUI mode logs are captured to the buffer (they would garble the
    // alternate screen); headless mode writes them to stderr so stdout stays
    // clean JSON. File logging is optional on top of either.
    let default_filter = format!("docdrop={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // The guard must stay alive for the duration of the program so file
    // logs flush
    let _file_guard = init_tracing(&config, filter, log_buffer.clone());

    tracing::debug!(url = %config.upload_url, demo = config.demo_mode, "starting");

    if let Some(path) = cli.file {
        return run_headless(&config, &path).await;
    }

    if !config.enable_tui {
        anyhow::bail!("TUI disabled and no --file given; nothing to do");
    }

    // Channel from the conversion worker to the TUI loop. Small buffer:
    // there is at most one live submission at a time, the rest are stale.
    let (event_tx, event_rx) = mpsc::channel(16);

    tui::run_tui(event_tx, event_rx, log_buffer, config).await
}

/// Initialize tracing with the TUI buffer layer or a stderr layer, plus an
/// optional rotating file layer. Returns the appender guard to keep alive.
fn init_tracing(
    config: &Config,
    filter: EnvFilter,
    log_buffer: LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let file_writer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };
                Some(tracing_appender::non_blocking(appender))
            }
            Err(e) => {
                eprintln!(
                    "Warning: could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    // File layer uses JSON format for structured log parsing. Constructed
    // per-branch so the fmt layer's subscriber type parameter can be inferred
    // independently for each registry composition.
    if config.enable_tui {
        let file_layer = file_writer.as_ref().map(|(non_blocking, _)| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking.clone())
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(TuiLogLayer::new(log_buffer))
            .with(file_layer)
            .init();
    } else {
        let file_layer = file_writer.as_ref().map(|(non_blocking, _)| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking.clone())
                .with_ansi(false)
        });
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(file_layer)
            .init();
    }

    file_writer.map(|(_, guard)| guard)
}

/// One-shot conversion: upload the file, print the canonical JSON to stdout.
async fn run_headless(config: &Config, path: &Path) -> Result<()> {
    let converter = convert::Converter::new(
        config.upload_url.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    match converter.convert(path).await {
        Ok(payload) => {
            println!("{}", payload.canonical_text()?);
            Ok(())
        }
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}
