//! Satellite vs. ground sensor agreement.

use crate::no2::molecules_cm2_to_ppb;
use serde::Serialize;

/// How closely a satellite estimate tracks the ground station.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Agreement {
    Good,
    Moderate,
    Poor,
}

impl Agreement {
    pub fn from_deviation(deviation_percent: f64) -> Agreement {
        if deviation_percent < 20.0 {
            Agreement::Good
        } else if deviation_percent < 40.0 {
            Agreement::Moderate
        } else {
            Agreement::Poor
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Agreement::Good => "good",
            Agreement::Moderate => "moderate",
            Agreement::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub satellite_ppb: f64,
    pub ground_ppb: f64,
    pub absolute_difference: f64,
    /// Relative to the ground reading; 0 when the ground reading is not positive
    pub deviation_percent: f64,
    pub agreement: Agreement,
}

impl Comparison {
    pub fn new(satellite_ppb: f64, ground_ppb: f64) -> Comparison {
        let absolute_difference = (satellite_ppb - ground_ppb).abs();
        let deviation_percent = if ground_ppb > 0.0 {
            absolute_difference / ground_ppb * 100.0
        } else {
            0.0
        };
        Comparison {
            satellite_ppb: round2(satellite_ppb),
            ground_ppb: round2(ground_ppb),
            absolute_difference: round2(absolute_difference),
            deviation_percent: round2(deviation_percent),
            agreement: Agreement::from_deviation(deviation_percent),
        }
    }

    pub fn from_column_density(satellite_molecules_cm2: f64, ground_ppb: f64) -> Comparison {
        Comparison::new(molecules_cm2_to_ppb(satellite_molecules_cm2), ground_ppb)
    }
}

/// Signed difference of `value` relative to `reference`, in percent.
pub fn percent_difference(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (value - reference) / reference * 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
