use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    error::ForecastError,
    model::{Condition, DaySummary, ForecastDay, ForecastResult, HourEntry},
    query::ForecastQuery,
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    /// Replace the HTTP client with one that gives up after `timeout`.
    /// `None` keeps the default client, which never times out.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> anyhow::Result<Self> {
        if let Some(timeout) = timeout {
            self.http = Client::builder().timeout(timeout).build()?;
        }
        Ok(self)
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    maxtemp_c: f64,
    mintemp_c: f64,
    avghumidity: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time: String,
    temp_c: f64,
    wind_kph: f64,
    humidity: u8,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: String,
    day: WaDay,
    #[serde(default)]
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

impl From<WaCondition> for Condition {
    fn from(c: WaCondition) -> Self {
        Condition { text: c.text, icon: c.icon }
    }
}

impl TryFrom<WaForecastHour> for HourEntry {
    type Error = ForecastError;

    fn try_from(h: WaForecastHour) -> Result<Self, Self::Error> {
        let time = NaiveDateTime::parse_from_str(&h.time, "%Y-%m-%d %H:%M")
            .map_err(|e| ForecastError::Parse(format!("Invalid hour time '{}': {e}", h.time)))?;

        Ok(HourEntry {
            time,
            temp_c: h.temp_c,
            wind_kph: h.wind_kph,
            humidity: h.humidity,
            condition: h.condition.into(),
        })
    }
}

impl TryFrom<WaForecastDay> for ForecastDay {
    type Error = ForecastError;

    fn try_from(d: WaForecastDay) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&d.date, "%Y-%m-%d")
            .map_err(|e| ForecastError::Parse(format!("Invalid date '{}': {e}", d.date)))?;

        let hours = d.hour.into_iter().map(HourEntry::try_from).collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastDay {
            date,
            summary: DaySummary {
                avg_temp_c: d.day.avgtemp_c,
                max_temp_c: d.day.maxtemp_c,
                min_temp_c: d.day.mintemp_c,
                avg_humidity: d.day.avghumidity,
                condition: d.day.condition.into(),
            },
            hours,
        })
    }
}

fn parse_forecast(body: &str) -> Result<ForecastResult, ForecastError> {
    let parsed: WaForecastResponse =
        serde_json::from_str(body).map_err(|e| ForecastError::Parse(e.to_string()))?;

    let days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(ForecastDay::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastResult {
        location_name: parsed.location.name,
        country: parsed.location.country,
        days,
    })
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(location = %query.location()))]
    async fn fetch(&self, query: &ForecastQuery) -> Result<ForecastResult, ForecastError> {
        let url = self.forecast_url();
        debug!(url = %url, params = ?query.query_params(), "Fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(&query.query_params())
            .send()
            .await
            .map_err(ForecastError::Request)?;

        let status = res.status();
        let body = res.text().await.map_err(ForecastError::Request)?;

        if !status.is_success() {
            return Err(ForecastError::Status { status, body: truncate_body(&body) });
        }

        let result = parse_forecast(&body)?;
        debug!(days = result.days.len(), "Forecast received");

        Ok(result)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "location": { "name": "Ankara", "country": "Turkey" },
        "forecast": { "forecastday": [
            {
                "date": "2024-06-18",
                "day": {
                    "avgtemp_c": 24.3, "maxtemp_c": 31.0, "mintemp_c": 16.2,
                    "avghumidity": 38,
                    "condition": {
                        "text": "Sunny",
                        "icon": "//cdn.weatherapi.com/weather/64x64/day/113.png"
                    }
                },
                "hour": [
                    {
                        "time": "2024-06-18 00:00", "temp_c": 18.1, "wind_kph": 7.2, "humidity": 55,
                        "condition": {
                            "text": "Clear",
                            "icon": "//cdn.weatherapi.com/weather/64x64/night/113.png"
                        }
                    }
                ]
            }
        ] }
    }"#;

    #[test]
    fn parses_sample_response() {
        let result = parse_forecast(SAMPLE).unwrap();

        assert_eq!(result.location_name, "Ankara");
        assert_eq!(result.country, "Turkey");
        assert_eq!(result.days.len(), 1);

        let day = &result.days[0];
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2024, 6, 18).unwrap());
        assert_eq!(day.summary.avg_humidity, 38.0);
        assert_eq!(day.summary.condition.text, "Sunny");
        assert_eq!(day.hours.len(), 1);
        assert_eq!(day.hours[0].humidity, 55);
        assert_eq!(day.hours[0].time.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        let body = r#"{ "location": { "name": "Ankara", "country": "Turkey" } }"#;
        assert!(matches!(parse_forecast(body), Err(ForecastError::Parse(_))));
    }

    #[test]
    fn bad_dates_are_parse_errors() {
        let body = SAMPLE.replace("\"date\": \"2024-06-18\"", "\"date\": \"18/06/2024\"");
        let err = parse_forecast(&body).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let p = WeatherApiProvider::with_base_url("k".into(), "http://localhost:1234/v1/".into());
        assert_eq!(p.forecast_url(), "http://localhost:1234/v1/forecast.json");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "ş".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
