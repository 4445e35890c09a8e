//! Forecast tomorrow's NO2 from a CSV time series.
//!
//! Input has a header row and two columns, `timestamp,no2`, with the NO2
//! column in molecules/cm². Rows with an unreadable timestamp or value are
//! skipped.

use aqi_core::forecast::{predict_no2, Forecast, FORECAST_HORIZON_HOURS, MIN_SAMPLES};
use aqi_utils::dates::{format_timestamp, parse_timestamp};
use aqi_utils::readings::parse_reading;
use anyhow::Context;
use chrono::{Duration, NaiveDateTime};
use log::{info, warn};
use serde::Serialize;
use std::io;

#[derive(Debug, Clone, PartialEq)]
pub struct No2Sample {
    pub timestamp: NaiveDateTime,
    /// molecules/cm²
    pub no2: f64,
}

/// Read samples and return them sorted by timestamp.
pub fn read_samples<R: io::Read>(reader: R) -> anyhow::Result<Vec<No2Sample>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let timestamp_str = record.get(0).unwrap_or("");
        let timestamp = match parse_timestamp(timestamp_str) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                warn!("Skipping row {}: bad timestamp {:?}: {}", line + 2, timestamp_str, e);
                continue;
            }
        };
        match parse_reading(record.get(1).unwrap_or("")) {
            Ok(Some(no2)) => samples.push(No2Sample { timestamp, no2 }),
            Ok(None) => warn!("Skipping row {}: missing NO2", line + 2),
            Err(e) => warn!("Skipping row {}: {}", line + 2, e),
        }
    }
    samples.sort_by_key(|sample| sample.timestamp);
    Ok(samples)
}

/// `(hours since the first sample, NO2)` pairs. Expects sorted samples.
pub fn hours_since_first(samples: &[No2Sample]) -> Vec<(f64, f64)> {
    let Some(first) = samples.first() else {
        return Vec::new();
    };
    samples
        .iter()
        .map(|sample| {
            let seconds = (sample.timestamp - first.timestamp).num_seconds();
            (seconds as f64 / 3600.0, sample.no2)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub prediction_time: String,
    #[serde(flatten)]
    pub forecast: Forecast,
}

pub fn forecast_samples(samples: &[No2Sample]) -> Option<ForecastReport> {
    let forecast = predict_no2(&hours_since_first(samples))?;
    let last = samples.last()?;
    let prediction_time = last.timestamp + Duration::hours(FORECAST_HORIZON_HOURS as i64);
    Some(ForecastReport {
        prediction_time: format_timestamp(&prediction_time),
        forecast,
    })
}

pub fn render_forecast(report: &ForecastReport) -> String {
    let forecast = &report.forecast;
    let reading = &forecast.reading;
    format!(
        "NO2 forecast for {}: {:e} molecules/cm² ({:.2} ppb)\n\
         AQI {} {} {}\n\
         confidence: {} (r² {}, {} points)",
        report.prediction_time,
        forecast.predicted_no2,
        reading.ppb,
        reading.aqi,
        reading.category.emoji,
        reading.category.label,
        forecast.confidence,
        forecast.r_squared,
        forecast.data_points_used,
    )
}

pub fn run_forecast(input: &str, json: bool) -> anyhow::Result<()> {
    let file = std::fs::File::open(input).with_context(|| format!("Failed to open {}", input))?;
    let samples = read_samples(file)?;
    info!("Read {} NO2 samples from {}", samples.len(), input);

    let report = match forecast_samples(&samples) {
        Some(report) => report,
        None => anyhow::bail!(
            "{} has {} usable samples; at least {} are needed",
            input,
            samples.len(),
            MIN_SAMPLES
        ),
    };
    info!(
        "Forecast complete: AQI {} ({} confidence)",
        report.forecast.reading.aqi, report.forecast.confidence
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_forecast(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::forecast::Confidence;

    const SAMPLES_CSV: &str = "\
timestamp,no2
2024-08-01T14:00:00,2e15
2024-08-01T12:00:00,1e15
garbage,5e15
2024-08-01T13:00:00,---
2024-08-01T16:00:00,3e15
";

    #[test]
    fn test_read_samples_sorts_and_skips() {
        let samples = read_samples(SAMPLES_CSV.as_bytes()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(format_timestamp(&samples[0].timestamp), "2024-08-01T12:00:00");
        assert_eq!(samples[0].no2, 1e15);
        assert_eq!(samples[2].no2, 3e15);
    }

    #[test]
    fn test_hours_since_first() {
        let samples = read_samples(SAMPLES_CSV.as_bytes()).unwrap();
        let points = hours_since_first(&samples);
        assert_eq!(points, vec![(0.0, 1e15), (2.0, 2e15), (4.0, 3e15)]);
        assert!(hours_since_first(&[]).is_empty());
    }

    #[test]
    fn test_forecast_samples() {
        let samples = read_samples(SAMPLES_CSV.as_bytes()).unwrap();
        let report = forecast_samples(&samples).unwrap();
        assert_eq!(report.prediction_time, "2024-08-02T16:00:00");
        assert_eq!(report.forecast.target_hour, 28.0);
        assert_eq!(report.forecast.confidence, Confidence::High);
        // 0.5e15 per hour from 1e15: 15e15 at hour 28, i.e. 300 ppb
        assert_eq!(report.forecast.reading.aqi, 138);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["prediction_time"], "2024-08-02T16:00:00");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["data_points_used"], 3);
    }

    #[test]
    fn test_forecast_needs_enough_samples() {
        let samples = read_samples("timestamp,no2\n2024-08-01T12:00:00,1e15\n".as_bytes()).unwrap();
        assert_eq!(forecast_samples(&samples), None);
    }

    #[test]
    fn test_render_forecast() {
        let samples = read_samples(SAMPLES_CSV.as_bytes()).unwrap();
        let text = render_forecast(&forecast_samples(&samples).unwrap());
        assert!(text.starts_with("NO2 forecast for 2024-08-02T16:00:00"));
        assert!(text.contains("(300.00 ppb)"));
        assert!(text.contains("confidence: high (r² 1, 3 points)"));
    }
}
