//! Per-session state and the search workflow.
//!
//! A search runs in three steps so the caller stays free to change inputs
//! while the request is in flight:
//!
//! 1. [`Session::begin_search`] evaluates alerts, builds the query and issues a
//!    new request generation.
//! 2. The caller runs the query through a [`ForecastProvider`].
//! 3. [`Session::apply`] stores the outcome, but only for the latest
//!    generation. Failures leave the displayed forecast untouched.
//!
//! [`Session::search`] chains the three for callers that simply await.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    alerts::{self, AlertFlags},
    error::ForecastError,
    model::{ForecastResult, Location, TimeSelectionMode},
    provider::ForecastProvider,
    query::ForecastQuery,
    render::{self, ForecastView},
    resolver::{self, DateSelection, RawDateInput},
};

/// A query waiting to be executed, tagged with its request generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: u64,
    pub query: ForecastQuery,
}

/// What [`Session::apply`] did with a fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result replaced the displayed forecast.
    Displayed,
    /// The fetch failed; the previous forecast is still displayed.
    Failed,
    /// A newer search was started meanwhile; the outcome was dropped.
    Superseded,
}

#[derive(Debug, Default)]
pub struct Session {
    mode: TimeSelectionMode,
    location: Option<Location>,
    selection: Option<DateSelection>,
    alerts: AlertFlags,
    result: Option<ForecastResult>,
    view: Option<ForecastView>,
    generation: u64,
    last_error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TimeSelectionMode {
        self.mode
    }

    /// Switch modes. Alerts are left as they are.
    pub fn set_mode(&mut self, mode: TimeSelectionMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh_view();
        }
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn selection(&self) -> Option<&DateSelection> {
        self.selection.as_ref()
    }

    /// Feed raw date-picker output through the resolver.
    pub fn pick_dates(&mut self, raw: RawDateInput) {
        self.selection = resolver::resolve(raw);
    }

    pub fn alerts(&self) -> &AlertFlags {
        &self.alerts
    }

    pub fn dismiss_alerts(&mut self) {
        self.alerts.clear();
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        self.result.as_ref()
    }

    /// Message of the most recent fetch failure, kept for diagnostics.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current projection of the displayed forecast, if there is one.
    ///
    /// Built when the result or the mode changes, not on each call.
    pub fn view(&self) -> Option<&ForecastView> {
        self.view.as_ref()
    }

    fn refresh_view(&mut self) {
        self.view = self.result.as_ref().map(|r| render::render(self.mode, r));
    }

    /// Handle a search trigger.
    ///
    /// Alerts are advisory: the query is built whatever they say. Returns
    /// `None` when the inputs are incomplete.
    pub fn begin_search(&mut self, today: NaiveDate) -> Option<PendingSearch> {
        if let Some(flags) =
            self.selection.as_ref().and_then(|sel| alerts::evaluate(today, self.mode, sel))
        {
            self.alerts = flags;
        }

        let Some(query) =
            ForecastQuery::build(self.mode, self.location, self.selection.as_ref(), today)
        else {
            debug!(mode = ?self.mode, "Search skipped: incomplete selection");
            return None;
        };

        self.generation += 1;
        info!(generation = self.generation, query = ?query, "Search started");

        Some(PendingSearch { generation: self.generation, query })
    }

    /// Record the outcome of the fetch started as `generation`.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<ForecastResult, ForecastError>,
    ) -> SearchOutcome {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "Dropping superseded forecast");
            return SearchOutcome::Superseded;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.refresh_view();
                self.last_error = None;
                SearchOutcome::Displayed
            }
            Err(err) => {
                warn!(generation, error = %err, "Error fetching forecast");
                self.last_error = Some(err.to_string());
                SearchOutcome::Failed
            }
        }
    }

    /// Begin, fetch and apply in one go.
    pub async fn search(
        &mut self,
        provider: &dyn ForecastProvider,
        today: NaiveDate,
    ) -> Option<SearchOutcome> {
        let pending = self.begin_search(today)?;
        let outcome = provider.fetch(&pending.query).await;
        Some(self.apply(pending.generation, outcome))
    }
}
