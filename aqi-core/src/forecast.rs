//! Next-day NO2 forecast from a short history of column densities.
//!
//! A straight line is fitted through `(hours since first sample, molecules/cm²)`
//! and read off one horizon past the latest sample.

use crate::no2::No2Reading;
use serde::Serialize;
use std::fmt;

pub const FORECAST_HORIZON_HOURS: f64 = 24.0;

/// Fewer samples than this cannot support a trend line.
pub const MIN_SAMPLES: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_r_squared(r_squared: f64) -> Confidence {
        if r_squared > 0.7 {
            Confidence::High
        } else if r_squared > 0.4 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinary least squares line with its coefficient of determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl LinearFit {
    /// `None` for an empty slice. When every x is equal the line is flat
    /// through the mean.
    pub fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (x, y) in points {
            sxx += (x - mean_x) * (x - mean_x);
            sxy += (x - mean_x) * (y - mean_y);
        }
        let slope = if sxx == 0.0 { 0.0 } else { sxy / sxx };
        let intercept = mean_y - slope * mean_x;

        let mut ss_res = 0.0;
        let mut ss_tot = 0.0;
        for (x, y) in points {
            let fitted = slope * x + intercept;
            ss_res += (y - fitted) * (y - fitted);
            ss_tot += (y - mean_y) * (y - mean_y);
        }
        let r_squared = if ss_tot == 0.0 { 0.0 } else { 1.0 - ss_res / ss_tot };

        Some(LinearFit {
            slope,
            intercept,
            r_squared,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// molecules/cm²
    pub predicted_no2: f64,
    pub reading: No2Reading,
    pub confidence: Confidence,
    pub r_squared: f64,
    pub data_points_used: usize,
    /// Hours after the first sample the prediction is for.
    pub target_hour: f64,
}

/// Forecast the column density `FORECAST_HORIZON_HOURS` after the latest sample.
///
/// Samples are `(hours since first sample, molecules/cm²)`. A runaway
/// extrapolation (over ten times the observed peak) is capped at 1.2 times
/// the peak; a negative one falls back to the observed mean.
pub fn predict_no2(samples: &[(f64, f64)]) -> Option<Forecast> {
    if samples.len() < MIN_SAMPLES {
        return None;
    }
    let fit = LinearFit::least_squares(samples)?;

    let last_hour = samples.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
    let target_hour = last_hour + FORECAST_HORIZON_HOURS;
    let peak = samples.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
    let mean = samples.iter().map(|(_, y)| y).sum::<f64>() / samples.len() as f64;

    let mut predicted = fit.predict(target_hour);
    if predicted > peak * 10.0 {
        predicted = peak * 1.2;
    } else if predicted < 0.0 {
        predicted = mean;
    }

    Some(Forecast {
        predicted_no2: predicted,
        reading: No2Reading::from_column_density(predicted),
        confidence: Confidence::from_r_squared(fit.r_squared),
        r_squared: (fit.r_squared * 1000.0).round() / 1000.0,
        data_points_used: samples.len(),
        target_hour,
    })
}
