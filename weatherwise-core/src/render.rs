//! Projection of a [`ForecastResult`] into what a front-end displays.
//!
//! Every row and card gets its key when the view is built: the entry's index
//! joined with a hash of its content. Keys are never regenerated on display.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use crate::model::{Condition, ForecastDay, ForecastResult, HourEntry, TimeSelectionMode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    pub key: String,
    pub time: NaiveDateTime,
    pub icon_url: String,
    pub temp_c: f64,
    pub wind_kph: f64,
    pub condition: String,
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCard {
    pub key: String,
    pub date: NaiveDate,
    pub icon_url: String,
    pub condition: String,
    pub avg_temp_c: f64,
    pub min_temp_c: f64,
    pub max_temp_c: f64,
    pub avg_humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForecastView {
    Hourly(Vec<HourlyRow>),
    Daily(Vec<DailyCard>),
}

impl ForecastView {
    pub fn len(&self) -> usize {
        match self {
            ForecastView::Hourly(rows) => rows.len(),
            ForecastView::Daily(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project `result` for `mode`.
///
/// Hourly uses only the first day's hours; daily uses every day.
pub fn render(mode: TimeSelectionMode, result: &ForecastResult) -> ForecastView {
    match mode {
        TimeSelectionMode::Hourly => ForecastView::Hourly(
            result
                .first_day_hours()
                .iter()
                .enumerate()
                .map(|(i, h)| hourly_row(i, h))
                .collect(),
        ),
        TimeSelectionMode::Daily => ForecastView::Daily(
            result.days.iter().enumerate().map(|(i, d)| daily_card(i, d)).collect(),
        ),
    }
}

fn hourly_row(index: usize, hour: &HourEntry) -> HourlyRow {
    let mut hasher = DefaultHasher::new();
    hour.time.hash(&mut hasher);
    hour.temp_c.to_bits().hash(&mut hasher);
    hour.wind_kph.to_bits().hash(&mut hasher);
    hour.humidity.hash(&mut hasher);
    hash_condition(&hour.condition, &mut hasher);

    HourlyRow {
        key: entry_key(index, hasher.finish()),
        time: hour.time,
        icon_url: icon_url(&hour.condition.icon),
        temp_c: hour.temp_c,
        wind_kph: hour.wind_kph,
        condition: hour.condition.text.clone(),
        humidity: hour.humidity,
    }
}

fn daily_card(index: usize, day: &ForecastDay) -> DailyCard {
    let s = &day.summary;

    let mut hasher = DefaultHasher::new();
    day.date.hash(&mut hasher);
    for v in [s.avg_temp_c, s.min_temp_c, s.max_temp_c, s.avg_humidity] {
        v.to_bits().hash(&mut hasher);
    }
    hash_condition(&s.condition, &mut hasher);

    DailyCard {
        key: entry_key(index, hasher.finish()),
        date: day.date,
        icon_url: icon_url(&s.condition.icon),
        condition: s.condition.text.clone(),
        avg_temp_c: s.avg_temp_c,
        min_temp_c: s.min_temp_c,
        max_temp_c: s.max_temp_c,
        avg_humidity: s.avg_humidity,
    }
}

fn hash_condition(c: &Condition, hasher: &mut impl Hasher) {
    c.text.hash(hasher);
    c.icon.hash(hasher);
}

fn entry_key(index: usize, hash: u64) -> String {
    format!("{index}-{hash:016x}")
}

/// Absolute icon URL. Provider icons are protocol-relative (`//cdn...`).
pub fn icon_url(icon: &str) -> String {
    if icon.contains("://") { icon.to_string() } else { format!("https:{icon}") }
}
