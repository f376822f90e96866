//! Core library for the `weatherwise` CLI.
//!
//! This crate defines:
//! - Shared domain models (locations, modes, date selections, forecast data)
//! - Date range resolution and advisory validation of a selection
//! - Forecast query construction and the provider abstraction that executes it
//! - The mode-dependent render model (hourly rows / daily cards)
//! - A [`Session`] that owns all per-session state between searches
//!
//! It is used by `weatherwise-cli`, but can also be reused by other front-ends.

pub mod alerts;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod render;
pub mod resolver;
pub mod session;

pub use alerts::{Alert, AlertFlags, MAX_HORIZON_DAYS};
pub use config::Config;
pub use error::{ForecastError, LocationParseError};
pub use model::{
    Condition, DaySummary, ForecastDay, ForecastResult, HourEntry, Location, TimeSelectionMode,
};
pub use provider::{ForecastProvider, WeatherApiProvider, provider_from_config};
pub use query::{ForecastQuery, HOURLY_WINDOW_HOURS};
pub use render::{DailyCard, ForecastView, HourlyRow};
pub use resolver::{DateSelection, RawDateInput};
pub use session::{PendingSearch, SearchOutcome, Session};
