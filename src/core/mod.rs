pub mod formatter;
pub mod normalizer;
pub mod service;

pub use crate::domain::model::{
    AppointmentContext, FeeTimetable, FormattedSchedule, Massage, MassageOffer, Money,
    NormalizedFeeEntry, QuoteResponse, RawFeeEntry,
};
pub use crate::domain::ports::{ConfigProvider, MassageGateway};
pub use crate::utils::error::Result;
