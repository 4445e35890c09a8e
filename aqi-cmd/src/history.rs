//! Classify a history of daily AQI readings from CSV.
//!
//! Input has a header row and two columns, `date,aqi`. Dates may be
//! `YYYY-MM-DD` or `YYYYMMDD`. Rows with an unreadable date are skipped;
//! a missing or unreadable AQI is kept and shows as 0, and has no trend on
//! either side of it.

use aqi_core::category::Severity;
use aqi_core::{format, trend, Trend};
use aqi_utils::dates::{format_date, parse_any_date};
use aqi_utils::readings::parse_reading;
use anyhow::Context;
use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;
use std::io;

/// One parsed input row.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub aqi: Option<f64>,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRow {
    pub date: String,
    pub aqi: i64,
    pub category: &'static str,
    pub severity: Severity,
    /// Empty unless both this reading and the one before it are present
    pub trend: Option<Trend>,
}

/// Read daily readings and return them sorted by date.
pub fn read_history<R: io::Read>(reader: R) -> anyhow::Result<Vec<DailyReading>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let date_str = record.get(0).unwrap_or("");
        let date = match parse_any_date(date_str) {
            Ok(date) => date,
            Err(e) => {
                warn!("Skipping row {}: bad date {:?}: {}", line + 2, date_str, e);
                continue;
            }
        };
        let aqi = match parse_reading(record.get(1).unwrap_or("")) {
            Ok(aqi) => aqi,
            Err(e) => {
                warn!("Row {}: {}", line + 2, e);
                None
            }
        };
        readings.push(DailyReading { date, aqi });
    }
    readings.sort_by_key(|reading| reading.date);
    Ok(readings)
}

/// Classify each reading and compute its trend against the day before it.
///
/// Only the `aqi` column is rounded; category and trend use the raw reading.
pub fn classify_history(readings: &[DailyReading]) -> Vec<HistoryRow> {
    let mut previous: Option<f64> = None;
    readings
        .iter()
        .map(|reading| {
            let category = aqi_core::classify(reading.aqi.unwrap_or(0.0));
            let row = HistoryRow {
                date: format_date(&reading.date),
                aqi: format(reading.aqi),
                category: category.key,
                severity: category.severity,
                trend: match (reading.aqi, previous) {
                    (Some(current), Some(prev)) => Some(trend(current, prev)),
                    _ => None,
                },
            };
            previous = reading.aqi;
            row
        })
        .collect()
}

pub fn write_history<W: io::Write>(writer: W, rows: &[HistoryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Run the history command: read `input`, classify, write `output`.
pub fn run_history(input: &str, output: &str) -> anyhow::Result<()> {
    let file = std::fs::File::open(input).with_context(|| format!("Failed to open {}", input))?;
    let readings = read_history(file)?;
    if readings.is_empty() {
        anyhow::bail!("{} has no readable rows", input);
    }
    info!(
        "Read {} readings from {} to {}",
        readings.len(),
        readings[0].date,
        readings[readings.len() - 1].date
    );

    let rows = classify_history(&readings);
    let out =
        std::fs::File::create(output).with_context(|| format!("Failed to create {}", output))?;
    write_history(out, &rows)?;
    info!("History complete. Output: {}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY_CSV: &str = "\
date,aqi
2024-08-03,130
2024-08-01,42.6
20240802,
2024-08-04,smoky
not-a-date,77
2024-08-05,310
";

    #[test]
    fn test_read_history_sorts_and_skips() {
        let readings = read_history(HISTORY_CSV.as_bytes()).unwrap();
        assert_eq!(readings.len(), 5);
        assert_eq!(readings[0].date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
        assert_eq!(readings[0].aqi, Some(42.6));
        assert_eq!(readings[1].aqi, None);
        assert_eq!(readings[2].aqi, Some(130.0));
        assert_eq!(readings[3].aqi, None);
    }

    #[test]
    fn test_classify_history() {
        let readings = read_history(HISTORY_CSV.as_bytes()).unwrap();
        let rows = classify_history(&readings);

        assert_eq!(rows[0].date, "2024-08-01");
        assert_eq!(rows[0].aqi, 43);
        assert_eq!(rows[0].category, "good");
        assert_eq!(rows[0].trend, None);

        // missing reading shows as 0 with no trend on either side
        assert_eq!(rows[1].aqi, 0);
        assert_eq!(rows[1].severity, Severity::Minimal);
        assert_eq!(rows[1].trend, None);

        assert_eq!(rows[2].category, "unhealthy_sensitive");
        assert_eq!(rows[2].trend, None);
        assert_eq!(rows[3].trend, None);

        assert_eq!(rows[4].category, "hazardous");
        assert_eq!(rows[4].severity, Severity::Severe);
    }

    fn day(d: u32, aqi: Option<f64>) -> DailyReading {
        DailyReading {
            date: NaiveDate::from_ymd_opt(2024, 9, d).unwrap(),
            aqi,
        }
    }

    #[test]
    fn test_classify_history_uses_raw_readings() {
        let rows = classify_history(&[day(1, Some(90.0)), day(2, Some(95.4)), day(3, Some(50.4))]);

        // 95.4 rounds to 95 for display but is 5.4 above 90
        assert_eq!(rows[1].aqi, 95);
        assert_eq!(rows[1].trend, Some(Trend::Deteriorating));

        // 50.4 displays as 50 but is past the Good band
        assert_eq!(rows[2].aqi, 50);
        assert_eq!(rows[2].category, "moderate");
        assert_eq!(rows[2].severity, Severity::Low);
        assert_eq!(rows[2].trend, Some(Trend::Improving));
    }

    #[test]
    fn test_trend_skips_missing_neighbours() {
        let rows = classify_history(&[
            day(1, Some(120.0)),
            day(2, None),
            day(3, Some(40.0)),
            day(4, Some(41.0)),
        ]);
        assert_eq!(rows[1].trend, None);
        assert_eq!(rows[2].trend, None);
        assert_eq!(rows[3].trend, Some(Trend::Stable));
    }

    #[test]
    fn test_write_history() {
        let readings = vec![
            DailyReading {
                date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
                aqi: Some(50.0),
            },
            DailyReading {
                date: NaiveDate::from_ymd_opt(2024, 8, 2).unwrap(),
                aqi: Some(53.0),
            },
        ];
        let rows = classify_history(&readings);
        let mut buf = Vec::new();
        write_history(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "date,aqi,category,severity,trend\n\
             2024-08-01,50,good,minimal,\n\
             2024-08-02,53,moderate,low,stable\n"
        );
    }

    #[test]
    fn test_empty_history() {
        let readings = read_history("date,aqi\n".as_bytes()).unwrap();
        assert!(readings.is_empty());
        assert!(classify_history(&readings).is_empty());
    }
}
