use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use pm_authz::cli::{self, Cli};
use pm_authz::config::{self, AppConfig};

fn main() -> anyhow::Result<ExitCode> {
    let env_file = config::load_env();
    init_tracing();
    match env_file {
        Some(path) => tracing::debug!(path = %path.display(), ".env loaded"),
        None => tracing::debug!("no .env file loaded"),
    }

    let cli = Cli::parse();
    let app_config = AppConfig::from_env().context("invalid environment configuration")?;

    let stdout = std::io::stdout();
    let allowed = cli::run(cli, &app_config, &mut stdout.lock())?;

    Ok(if allowed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
