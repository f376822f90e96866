use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::{Location, TimeSelectionMode},
    resolver::DateSelection,
};

/// Length of the hourly request window.
pub const HOURLY_WINDOW_HOURS: u32 = 24;

/// Request descriptor handed to a [`crate::ForecastProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastQuery {
    /// `horizon` is passed through as-is, even above the advisory limit.
    Daily { location: Location, horizon: u32 },
    Hourly { location: Location, date: NaiveDate },
}

impl ForecastQuery {
    /// Build a query from the current inputs.
    ///
    /// Returns `None` when the inputs are incomplete: no city, no selection, or
    /// a daily range without an end. Alerts are not consulted here.
    pub fn build(
        mode: TimeSelectionMode,
        location: Option<Location>,
        selection: Option<&DateSelection>,
        today: NaiveDate,
    ) -> Option<Self> {
        let location = location?;
        let selection = selection?;

        match mode {
            TimeSelectionMode::Daily => {
                let horizon = selection.horizon(today)?;
                Some(ForecastQuery::Daily { location, horizon })
            }
            TimeSelectionMode::Hourly => {
                Some(ForecastQuery::Hourly { location, date: selection.start })
            }
        }
    }

    pub fn mode(&self) -> TimeSelectionMode {
        match self {
            ForecastQuery::Daily { .. } => TimeSelectionMode::Daily,
            ForecastQuery::Hourly { .. } => TimeSelectionMode::Hourly,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            ForecastQuery::Daily { location, .. } | ForecastQuery::Hourly { location, .. } => {
                *location
            }
        }
    }

    /// Query parameters for the forecast endpoint, credentials excluded.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", self.location().as_str().to_string()),
            ("aqi", "no".to_string()),
            ("alerts", "no".to_string()),
        ];

        match self {
            ForecastQuery::Daily { horizon, .. } => {
                params.push(("days", horizon.to_string()));
            }
            ForecastQuery::Hourly { date, .. } => {
                params.push(("dt", date.format("%Y-%m-%d").to_string()));
                params.push(("hours", HOURLY_WINDOW_HOURS.to_string()));
            }
        }

        params
    }
}
