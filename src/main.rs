//! Riddle Quest

use clap::Parser;
use riddle_quest::{Config, Result, VERSION, cli, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    let config = if let Some(config_path) = &args.config {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    // Logging level comes from config, so the subscriber is set up after loading it
    let log_file = config.logging.file_for(args.is_interactive());
    init_logging(&config.logging.level, log_file.as_deref())?;

    tracing::info!("Riddle Quest v{}", VERSION);
    tracing::debug!("Parsed arguments: {:?}", args);
    tracing::debug!("Loaded configuration: {:?}", config);

    match cli::execute(args, config).await {
        Err(e) if e.is_user_quit() => Ok(()),
        other => other,
    }
}
