use anyhow::Result;
use clap::Parser;

use estate_cli::cli::{self, Cli};
use estate_cli::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Configuration loaded: API {}", config.api.base_url.as_deref().unwrap_or("<unset>"));

    cli::run(cli.command, &config).await
}
