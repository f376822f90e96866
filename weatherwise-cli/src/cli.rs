use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use inquire::Select;
use std::path::PathBuf;
use tracing::debug;

use weatherwise_core::{
    Config, Location, RawDateInput, SearchOutcome, Session, TimeSelectionMode,
    provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherwise", version, about = "Daily and hourly forecasts for Turkish cities")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the supported cities.
    Cities,

    /// Show one card per day between two dates.
    Daily {
        /// City name; prompts when omitted and no default is configured.
        #[arg(long)]
        city: Option<Location>,

        /// First day (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,
    },

    /// Show 24 hourly rows for one day.
    Hourly {
        /// City name; prompts when omitted and no default is configured.
        #[arg(long)]
        city: Option<Location>,

        /// Day to forecast (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        if let Command::Cities = self.command {
            for loc in Location::all() {
                println!("{loc}");
            }
            return Ok(());
        }

        let (mode, city, dates) = self.command.picker_input(today())?;

        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        let location = match city {
            Some(loc) => loc,
            None => pick_city(&config)?,
        };
        let provider = provider_from_config(&config)?;

        let mut session = Session::new();
        session.set_mode(mode);
        session.set_location(location);
        session.pick_dates(dates);

        let Some(outcome) = session.search(provider.as_ref(), today()).await else {
            bail!("End date must not be before the start date");
        };

        print!("{}", output::format_alerts(session.alerts()));

        if outcome == SearchOutcome::Failed {
            bail!(
                "Could not fetch forecast: {}",
                session.last_error().unwrap_or("unknown error")
            );
        }

        if let (Some(result), Some(view)) = (session.result(), session.view()) {
            print!("{}", output::format_view(result, view));
        }

        Ok(())
    }
}

impl Command {
    /// Mode, city and raw dates for a forecast command, with the date
    /// picker's rule applied: nothing earlier than `today`.
    fn picker_input(
        &self,
        today: NaiveDate,
    ) -> anyhow::Result<(TimeSelectionMode, Option<Location>, RawDateInput)> {
        match *self {
            Command::Cities => bail!("`cities` does not take dates"),
            Command::Daily { city, from, to } => {
                let from = not_before_today("--from", from.unwrap_or(today), today)?;
                let to = not_before_today("--to", to, today)?;
                Ok((TimeSelectionMode::Daily, city, RawDateInput::Range(Some(from), Some(to))))
            }
            Command::Hourly { city, date } => {
                let date = not_before_today("--date", date, today)?;
                Ok((TimeSelectionMode::Hourly, city, RawDateInput::Single(Some(date))))
            }
        }
    }
}

fn not_before_today(flag: &str, date: NaiveDate, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    if date < today {
        bail!("{flag} {date} is in the past; pick {today} or later");
    }
    Ok(date)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Configured default city, or an interactive pick.
fn pick_city(config: &Config) -> anyhow::Result<Location> {
    if let Some(loc) = config.default_location()? {
        debug!(city = %loc, "Using default city from config");
        return Ok(loc);
    }

    Select::new("City", Location::all().to_vec())
        .prompt()
        .context("No city selected")
}
