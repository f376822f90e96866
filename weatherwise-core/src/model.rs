use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LocationParseError;

/// Cities the forecast can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Istanbul,
    Ankara,
    Izmir,
    Antalya,
}

impl Location {
    /// Name as shown to the user and sent as the `q` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Istanbul => "İstanbul",
            Location::Ankara => "Ankara",
            Location::Izmir => "İzmir",
            Location::Antalya => "Antalya",
        }
    }

    fn ascii_name(&self) -> &'static str {
        match self {
            Location::Istanbul => "Istanbul",
            Location::Ankara => "Ankara",
            Location::Izmir => "Izmir",
            Location::Antalya => "Antalya",
        }
    }

    pub const fn all() -> &'static [Location] {
        &[Location::Istanbul, Location::Ankara, Location::Izmir, Location::Antalya]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Location {
    type Error = LocationParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();

        Location::all()
            .iter()
            .copied()
            .find(|loc| value == loc.as_str() || value.eq_ignore_ascii_case(loc.ascii_name()))
            .ok_or_else(|| LocationParseError(value.to_string()))
    }
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::try_from(s)
    }
}

/// Which projection of the forecast the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSelectionMode {
    #[default]
    Daily,
    Hourly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    /// Protocol-relative icon path as delivered by the provider, e.g.
    /// `//cdn.weatherapi.com/weather/64x64/day/113.png`.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub avg_temp_c: f64,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub avg_humidity: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourEntry {
    pub time: NaiveDateTime,
    pub temp_c: f64,
    pub wind_kph: f64,
    pub humidity: u8,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub summary: DaySummary,
    pub hours: Vec<HourEntry>,
}

/// A complete forecast as returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub location_name: String,
    pub country: String,
    pub days: Vec<ForecastDay>,
}

impl ForecastResult {
    /// Hour sequence of the first day, or an empty slice when there are no days.
    pub fn first_day_hours(&self) -> &[HourEntry] {
        self.days.first().map(|d| d.hours.as_slice()).unwrap_or(&[])
    }
}
