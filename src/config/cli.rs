use crate::config::{OutputFormat, DEFAULT_ENDPOINT, MAX_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "massage-quote")]
#[command(about = "Fetch massage quotes and their cancellation schedules")]
pub struct CliConfig {
    /// Appointment date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[arg(long, default_value = "10")]
    pub timeout_seconds: u64,

    #[arg(long, value_delimiter = ',', default_value = "AVAILABLE,ON_REQUEST")]
    pub statuses: Vec<String>,

    /// TOML configuration file; replaces --endpoint, --timeout-seconds and --statuses
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn gateway_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn accepted_statuses(&self) -> &[String] {
        &self.statuses
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, MAX_TIMEOUT_SECONDS)?;
        validation::validate_non_empty_list("statuses", &self.statuses)?;
        Ok(())
    }
}
