//! Display helpers projected from the category table.
//!
//! Every function here goes through [`classify`], so band boundaries live in
//! exactly one place.

use crate::category::{AqiCategory, Severity, CATEGORIES};
use serde::Serialize;

/// Default top of the progress-bar scale.
pub const DEFAULT_SCALE_MAX: f64 = 300.0;

/// Map any AQI value to its band.
///
/// The first band whose upper bound is at least `aqi` wins, so band edges
/// are inclusive on the upper end: 50 is Good and 50.5 is Moderate.
/// Negative values and NaN land in the lowest band; anything above 300
/// is Hazardous.
pub fn classify(aqi: f64) -> &'static AqiCategory {
    if aqi.is_nan() {
        return &CATEGORIES[0];
    }
    CATEGORIES
        .iter()
        .find(|category| match category.upper {
            Some(upper) => aqi <= f64::from(upper),
            None => true,
        })
        .unwrap_or(&CATEGORIES[CATEGORIES.len() - 1])
}

pub fn color(aqi: f64) -> &'static str {
    classify(aqi).color
}

pub fn gradient(aqi: f64) -> String {
    classify(aqi).css_gradient()
}

pub fn label(aqi: f64) -> &'static str {
    classify(aqi).label
}

pub fn description(aqi: f64) -> &'static str {
    classify(aqi).description
}

pub fn severity(aqi: f64) -> Severity {
    classify(aqi).severity
}

pub fn emoji(aqi: f64) -> &'static str {
    classify(aqi).emoji
}

pub fn recommendation(aqi: f64) -> &'static str {
    classify(aqi).recommendation
}

/// Rounded AQI for display.
///
/// Missing and non-finite readings show as 0. Halves round up
/// (42.5 -> 43, -2.5 -> -2).
pub fn format(aqi: Option<f64>) -> i64 {
    match aqi {
        Some(value) if value.is_finite() => {
            // f64::round sends negative halves away from zero
            let rounded = value.round();
            if value - rounded == 0.5 {
                (rounded + 1.0) as i64
            } else {
                rounded as i64
            }
        }
        _ => 0,
    }
}

/// `aqi` as a percentage of `max`, clamped to 0..=100.
pub fn percentage_of_scale(aqi: f64, max: f64) -> f64 {
    if aqi.is_nan() || max.is_nan() || max <= 0.0 {
        return 0.0;
    }
    (aqi / max * 100.0).clamp(0.0, 100.0)
}

/// A classified reading ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub aqi: i64,
    pub percentage: f64,
    pub category: &'static AqiCategory,
}

impl Classification {
    pub fn of(aqi: f64, scale_max: f64) -> Classification {
        Classification {
            aqi: format(Some(aqi)),
            percentage: percentage_of_scale(aqi, scale_max),
            category: classify(aqi),
        }
    }
}
