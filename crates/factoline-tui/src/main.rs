//! `factoline`: terminal storefront for a professional lumber catalog.
//!
//! Built on [ratatui](https://ratatui.rs) over the `factoline-core`
//! [`Storefront`](factoline_core::Storefront): free-text search in the
//! header, faceted filters in the sidebar, product cards in a responsive
//! grid, and a cart counter fed by "Ajouter".
//!
//! Logs are written to a file (default `/tmp/factoline.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod components;
mod event;
mod layout;
#[cfg(test)]
mod test_util;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use factoline_config::Config;
use factoline_core::{Catalog, Storefront};

use crate::app::App;

/// Browse, search and filter a lumber catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "factoline", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(short, long, env = "FACTOLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog file (.json or .toml); the built-in catalog is used otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Initial search text
    #[arg(short, long)]
    query: Option<String>,

    /// Log file path (defaults to /tmp/factoline.log)
    #[arg(long, default_value = "/tmp/factoline.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. Nothing may log to stdout/stderr while the
/// terminal is in raw mode. The returned guard flushes logs on drop.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "factoline={log_level},factoline_core={log_level},factoline_config={log_level}"
        ))
    });

    let log_dir = cli
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("factoline.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the effective config. Priority: CLI flags > env > file > defaults.
fn load_settings(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => factoline_config::load_config_from(path),
        None => factoline_config::load_config(),
    }
    .wrap_err("Failed to load configuration")?;

    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(query) = &cli.query {
        config.initial_query.clone_from(query);
    }
    Ok(config)
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog {
        Some(path) => Ok(Catalog::from_path(path)?),
        None => Ok(Catalog::builtin()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let config = load_settings(&cli)?;
    let catalog = load_catalog(&config)?;

    let source = config
        .catalog
        .as_deref()
        .map_or_else(|| "(built-in)".into(), |p| p.display().to_string());
    info!(
        catalog = %source,
        products = catalog.products.len(),
        "starting factoline"
    );

    let storefront = Storefront::with_initial(
        catalog,
        config.initial_query.clone(),
        config.initial_selection(),
    );
    let mut app = App::new(storefront, config.ui);
    app.run().await?;

    Ok(())
}
