//! jlinkw - jlink build step driver
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use jlinkw::cli::{Cli, Commands};
use jlinkw::config::ConfigManager;
use jlinkw::error::{JlinkwError, JlinkwResult};
use jlinkw::jlink::InterruptSignal;
use jlinkw::ui::UiContext;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> JlinkwResult<()> {
    let cli = Cli::parse();

    // Explicit --config, then project-local jlinkw.toml, then user config
    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None if cli.no_local => ConfigManager::new(),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| JlinkwError::io("getting current directory", e))?;
            ConfigManager::find_local_config(&cwd)
                .map(ConfigManager::with_path)
                .unwrap_or_default()
        }
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config: {}", config_manager.path().display());

    let ctx = UiContext::detect().with_plain(cli.plain);

    match cli.command {
        Commands::Build(args) => {
            let interrupt = InterruptSignal::new();
            let on_ctrl_c = interrupt.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    on_ctrl_c.interrupt();
                }
            });
            jlinkw::cli::commands::build(args, &config, &ctx, interrupt).await
        }
        Commands::Modules(args) => jlinkw::cli::commands::modules(args, &config, &ctx).await,
        Commands::Toolchains => jlinkw::cli::commands::toolchains(&config, &ctx).await,
        Commands::Config(args) => {
            jlinkw::cli::commands::config(args, &config, &config_manager, &ctx).await
        }
    }
}

/// 0 = warn (spinners only), 1 = info, 2+ = debug; RUST_LOG wins when set
fn init_logging(verbose: u8, log_format: &str) {
    let level = match verbose {
        0 => "jlinkw=warn",
        1 => "jlinkw=info",
        _ => "jlinkw=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log_format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.with_target(false).without_time().init();
    }
}
