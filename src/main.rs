use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use connect_four_rules::config::{validate_log_level, AppConfig, LogConfig};
use connect_four_rules::driver::{run_game, PlayOptions};

/// Play Connect Four from column numbers read on stdin.
#[derive(Parser)]
#[command(name = "con4", about = "Connect Four rules engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "con4.toml")]
    config: PathBuf,

    /// Print the board after every successful move
    #[arg(long)]
    render: bool,

    /// Report rejected columns and keep reading instead of ending the game
    #[arg(long)]
    retry: bool,

    /// Override the log level (trace, debug, info, warn, error); beats RUST_LOG
    #[arg(long)]
    log_level: Option<String>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    if let Some(level) = cli.log_level.as_deref() {
        validate_log_level(level).context("invalid --log-level")?;
    }
    let env_filter = std::env::var("RUST_LOG").ok().filter(|s| !s.is_empty());

    // Logging goes up before the config is read so its warnings are shown.
    let initial = LogConfig::default().directive(cli.log_level.as_deref(), env_filter.as_deref());
    let log_handle = init_logging(&initial)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.render {
        config.render.enabled = true;
    }
    if cli.retry {
        config.play.retry_on_input_error = true;
    }
    if let Some(level) = cli.log_level.as_deref() {
        config.log.level = level.to_string();
    }
    config.validate().context("invalid configuration")?;

    let directive = config
        .log
        .directive(cli.log_level.as_deref(), env_filter.as_deref());
    if directive != initial {
        let filter = EnvFilter::try_new(&directive)
            .with_context(|| format!("parsing log filter '{directive}'"))?;
        log_handle
            .reload(filter)
            .context("applying configured log level")?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    run_game(stdin.lock(), &mut stdout, PlayOptions::from(&config))
        .context("running game loop")?;
    Ok(())
}

/// Install the stderr subscriber; the handle swaps the filter once the
/// config file is known.
fn init_logging(directive: &str) -> Result<reload::Handle<EnvFilter, Registry>> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("parsing log filter '{directive}'"))?;
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    Ok(handle)
}
