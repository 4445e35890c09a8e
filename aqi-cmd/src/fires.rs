//! List active fires near a location from a FIRMS CSV export.
//!
//! Columns are found by header name: `latitude`, `longitude`, `bright_ti4`
//! (VIIRS) or `brightness` (MODIS), and `confidence`. Rows without a usable
//! position are skipped; a missing brightness or confidence counts as 0.

use aqi_core::wildfire::{fires_within, Fire, FireDetection};
use aqi_utils::readings::parse_reading_lossy;
use anyhow::Context;
use log::{info, warn};
use serde::Serialize;
use std::io;

fn column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name)))
}

pub fn read_detections<R: io::Read>(reader: R) -> anyhow::Result<Vec<FireDetection>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let lat_col = column(&headers, &["latitude"]).context("FIRMS CSV has no latitude column")?;
    let lon_col = column(&headers, &["longitude"]).context("FIRMS CSV has no longitude column")?;
    let bright_col = column(&headers, &["bright_ti4", "brightness"]);
    let conf_col = column(&headers, &["confidence"]);

    let cell = |record: &csv::StringRecord, col: Option<usize>| {
        col.and_then(|i| record.get(i))
            .and_then(parse_reading_lossy)
    };

    let mut detections = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let (Some(latitude), Some(longitude)) =
            (cell(&record, Some(lat_col)), cell(&record, Some(lon_col)))
        else {
            warn!("Skipping row {}: no position", line + 2);
            continue;
        };
        detections.push(FireDetection {
            latitude,
            longitude,
            brightness: cell(&record, bright_col).unwrap_or(0.0),
            confidence: cell(&record, conf_col).unwrap_or(0.0),
        });
    }
    Ok(detections)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FireReport {
    pub count: usize,
    pub radius_km: f64,
    pub closest_fire: Option<Fire>,
    pub fires: Vec<Fire>,
}

impl FireReport {
    pub fn new(detections: &[FireDetection], lat: f64, lon: f64, radius_km: f64) -> FireReport {
        let fires = fires_within(detections, lat, lon, radius_km);
        FireReport {
            count: fires.len(),
            radius_km,
            closest_fire: fires.first().cloned(),
            fires,
        }
    }
}

pub fn render_fires(report: &FireReport) -> String {
    let mut lines = vec![format!(
        "{} active fire(s) within {} km",
        report.count, report.radius_km
    )];
    for fire in &report.fires {
        lines.push(format!(
            "- {:.2} km at ({:.4}, {:.4}): {} ({} K, {}% confidence)",
            fire.distance_km,
            fire.latitude,
            fire.longitude,
            fire.severity,
            fire.brightness,
            fire.confidence
        ));
    }
    lines.join("\n")
}

pub fn run_fires(input: &str, lat: f64, lon: f64, radius_km: f64, json: bool) -> anyhow::Result<()> {
    let file = std::fs::File::open(input).with_context(|| format!("Failed to open {}", input))?;
    let detections = read_detections(file)?;
    info!("Read {} fire detections from {}", detections.len(), input);

    let report = FireReport::new(&detections, lat, lon, radius_km);
    match &report.closest_fire {
        Some(fire) => warn!(
            "{} fire(s) within {} km, closest {} km",
            report.count, radius_km, fire.distance_km
        ),
        None => info!("No fires within {} km", radius_km),
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_fires(&report));
    }
    Ok(())
}
