//! Air Quality Index classification.
//!
//! The EPA category table lives in [`category`]; [`scale`] and [`trend`]
//! derive display values from it. [`no2`], [`comparison`] and [`advisory`]
//! cover converting satellite NO2 readings, checking them against ground
//! stations, and turning an AQI into health guidance. [`breath`],
//! [`forecast`] and [`wildfire`] add the respiratory score, the next-day NO2
//! outlook and nearby fire detections.

pub mod advisory;
pub mod breath;
pub mod category;
pub mod comparison;
pub mod forecast;
pub mod no2;
pub mod scale;
pub mod trend;
pub mod wildfire;

pub use category::{AqiCategory, Severity, CATEGORIES};
pub use scale::{
    classify, color, description, emoji, format, gradient, label, percentage_of_scale,
    recommendation, severity, Classification, DEFAULT_SCALE_MAX,
};
pub use trend::{trend, trend_indicator, Trend};
