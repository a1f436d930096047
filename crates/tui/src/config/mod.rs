use std::{path::PathBuf, time::Duration};

use clap::Parser;
use engine::{Amount, SenderIdentity, fixtures};
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/qrpay.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sender_name: String,
    pub sender_upi: String,
    pub bank: String,
    /// Balance shown on the home screen, in rupees. Display only.
    pub balance: String,
    pub settlement_delay_ms: u64,
    /// Text file standing in for the camera: one decoded payload per line.
    pub camera_feed: Option<PathBuf>,
    pub frame_interval_ms: u64,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sender_name: fixtures::DEFAULT_SENDER_NAME.to_string(),
            sender_upi: fixtures::DEFAULT_SENDER_UPI.to_string(),
            bank: fixtures::DEFAULT_BANK.to_string(),
            balance: fixtures::DEFAULT_BALANCE_RUPEES.to_string(),
            settlement_delay_ms: 1500,
            camera_feed: None,
            frame_interval_ms: 400,
            log_file: PathBuf::from("qrpay.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn sender(&self) -> SenderIdentity {
        SenderIdentity {
            name: self.sender_name.clone(),
            upi_handle: self.sender_upi.clone(),
            bank: self.bank.clone(),
        }
    }

    pub fn balance(&self) -> Result<Amount> {
        self.balance.parse().map_err(|err| AppError::Setting {
            key: "balance",
            message: format!("{err}"),
        })
    }

    pub fn settlement_delay(&self) -> Duration {
        Duration::from_millis(self.settlement_delay_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Parser)]
#[command(name = "qrpay", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the camera feed file (one decoded QR payload per line).
    #[arg(long)]
    camera_feed: Option<PathBuf>,
    /// Override the simulated settlement delay, in milliseconds.
    #[arg(long)]
    settlement_delay_ms: Option<u64>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("QRPAY"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(camera_feed) = args.camera_feed {
        settings.camera_feed = Some(camera_feed);
    }
    if let Some(delay) = args.settlement_delay_ms {
        settings.settlement_delay_ms = delay;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
