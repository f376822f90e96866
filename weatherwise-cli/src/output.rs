use std::fmt::{self, Write};

use weatherwise_core::{AlertFlags, ForecastResult, ForecastView};

/// One `! message` line per active alert.
pub fn format_alerts(alerts: &AlertFlags) -> String {
    alerts.iter().map(|a| format!("! {a}\n")).collect()
}

pub fn format_view(result: &ForecastResult, view: &ForecastView) -> String {
    let mut out = format!("{}, {}\n\n", result.location_name, result.country);
    // Writing into a String never fails.
    write_view(&mut out, view).unwrap_or_default();
    out
}

fn write_view(out: &mut String, view: &ForecastView) -> fmt::Result {
    match view {
        ForecastView::Hourly(rows) => {
            writeln!(
                out,
                "{:<6} {:>9} {:>11} {:>9}  {:<20}  {}",
                "Time", "Temp (°C)", "Wind (kph)", "Humidity", "Condition", "Icon"
            )?;
            for row in rows {
                writeln!(
                    out,
                    "{:<6} {:>9.1} {:>11.1} {:>8}%  {:<20}  {}",
                    row.time.format("%H:%M"),
                    row.temp_c,
                    row.wind_kph,
                    row.humidity,
                    row.condition,
                    row.icon_url
                )?;
            }
        }
        ForecastView::Daily(cards) => {
            for card in cards {
                writeln!(out, "{}  {}", card.date.format("%Y-%m-%d"), card.condition)?;
                writeln!(out, "  {:.1}°C", card.avg_temp_c)?;
                writeln!(out, "  Max Temp: {:.1}°C", card.max_temp_c)?;
                writeln!(out, "  Min Temp: {:.1}°C", card.min_temp_c)?;
                writeln!(out, "  Humidity: {:.0}%", card.avg_humidity)?;
                writeln!(out, "  {}\n", card.icon_url)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherwise_core::{
        Alert, Condition, DaySummary, ForecastDay, HourEntry, TimeSelectionMode, render::render,
    };

    fn result() -> ForecastResult {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
        ForecastResult {
            location_name: "Antalya".into(),
            country: "Turkey".into(),
            days: vec![ForecastDay {
                date,
                summary: DaySummary {
                    avg_temp_c: 29.44,
                    max_temp_c: 34.0,
                    min_temp_c: 24.1,
                    avg_humidity: 55.0,
                    condition: Condition { text: "Sunny".into(), icon: "//cdn/113.png".into() },
                },
                hours: vec![],
            }],
        }
    }

    #[test]
    fn no_alerts_prints_nothing() {
        assert_eq!(format_alerts(&AlertFlags::default()), "");
    }

    #[test]
    fn alerts_one_per_line() {
        let mut flags = AlertFlags::default();
        flags.insert(Alert::HorizonExceeded);
        flags.insert(Alert::StartNotToday);

        assert_eq!(
            format_alerts(&flags),
            "! Start date is not today.\n! You cannot select more than 10 days.\n"
        );
    }

    #[test]
    fn daily_card_lines() {
        let r = result();
        let out = format_view(&r, &render(TimeSelectionMode::Daily, &r));

        assert!(out.starts_with("Antalya, Turkey\n"));
        assert!(out.contains("2024-06-18  Sunny"));
        assert!(out.contains("  29.4°C"));
        assert!(out.contains("Max Temp: 34.0°C"));
        assert!(out.contains("Humidity: 55%"));
        assert!(out.contains("https://cdn/113.png"));
    }

    #[test]
    fn hourly_rows_show_icon() {
        let mut r = result();
        let time = r.days[0].date.and_hms_opt(13, 0, 0).unwrap();
        r.days[0].hours.push(HourEntry {
            time,
            temp_c: 31.5,
            wind_kph: 12.2,
            humidity: 40,
            condition: Condition { text: "Sunny".into(), icon: "//cdn/day/113.png".into() },
        });

        let out = format_view(&r, &render(TimeSelectionMode::Hourly, &r));
        let row = out.lines().find(|l| l.starts_with("13:00")).unwrap();

        assert!(out.contains("Icon"));
        assert!(row.contains("31.5"));
        assert!(row.contains("40%"));
        assert!(row.ends_with("https://cdn/day/113.png"));
    }

    #[test]
    fn hourly_table_has_header_only_when_empty() {
        let r = result();
        let out = format_view(&r, &render(TimeSelectionMode::Hourly, &r));
        assert_eq!(out.lines().filter(|l| !l.is_empty()).count(), 2);
    }
}
