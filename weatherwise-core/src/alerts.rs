//! Advisory checks on a daily date range.
//!
//! Alerts never block a search. They are recomputed on a daily search with a
//! complete range and otherwise left as they were until dismissed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{model::TimeSelectionMode, resolver::DateSelection};

/// Largest horizon that does not raise [`Alert::HorizonExceeded`].
pub const MAX_HORIZON_DAYS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alert {
    StartNotToday,
    HorizonExceeded,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::StartNotToday => "Start date is not today.",
            Alert::HorizonExceeded => "You cannot select more than 10 days.",
        }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFlags {
    start_not_today: bool,
    horizon_exceeded: bool,
}

impl AlertFlags {
    pub fn contains(&self, alert: Alert) -> bool {
        match alert {
            Alert::StartNotToday => self.start_not_today,
            Alert::HorizonExceeded => self.horizon_exceeded,
        }
    }

    pub fn insert(&mut self, alert: Alert) {
        match alert {
            Alert::StartNotToday => self.start_not_today = true,
            Alert::HorizonExceeded => self.horizon_exceeded = true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.start_not_today && !self.horizon_exceeded
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Active alerts in display order.
    pub fn iter(&self) -> impl Iterator<Item = Alert> + '_ {
        [Alert::StartNotToday, Alert::HorizonExceeded]
            .into_iter()
            .filter(|a| self.contains(*a))
    }
}

/// Evaluate a selection at search time.
///
/// Returns `None` when the check does not apply (hourly mode, or a daily range
/// without an end); callers keep their previous flags in that case.
pub fn evaluate(
    today: NaiveDate,
    mode: TimeSelectionMode,
    selection: &DateSelection,
) -> Option<AlertFlags> {
    if mode != TimeSelectionMode::Daily {
        return None;
    }
    let horizon = selection.horizon(today)?;

    let mut flags = AlertFlags::default();
    if selection.start != today {
        flags.insert(Alert::StartNotToday);
    }
    if horizon > MAX_HORIZON_DAYS {
        flags.insert(Alert::HorizonExceeded);
    }

    Some(flags)
}
