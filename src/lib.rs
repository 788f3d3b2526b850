pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{OutputFormat, TomlConfig};

pub use crate::adapters::HttpMassageGateway;
pub use crate::core::{
    formatter::format_schedule, normalizer::normalize, service::MassageService,
};
pub use domain::model::{
    AppointmentContext, FeeTimetable, FormattedSchedule, MassageOffer, Money, NormalizedFeeEntry,
    RawFeeEntry,
};
pub use utils::error::{QuoteError, Result};
