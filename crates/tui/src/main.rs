mod app;
mod capture;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, sync::Mutex};

use crate::error::{AppError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    // The terminal owns stdout, so logs go to a file.
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|source| AppError::LogFile {
            path: config.log_file.clone(),
            source,
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "qrpay_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    tracing::info!(sender = %config.sender_upi, "starting qrpay");
    let mut app = app::App::new(&config)?;
    app.run().await?;
    Ok(())
}
