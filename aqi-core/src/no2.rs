//! NO2 concentration to AQI.
//!
//! Satellite instruments report NO2 as a tropospheric vertical column density
//! in molecules/cm². We convert that to an approximate surface concentration
//! in ppb and then interpolate along the EPA NO2 breakpoints.

use crate::category::AqiCategory;
use crate::scale::classify;
use serde::Serialize;

/// Empirical: 1e15 molecules/cm² is roughly 20 ppb at the surface.
pub const PPB_PER_1E15_MOLECULES: f64 = 20.0;

/// Reported when a concentration is past the last breakpoint.
pub const AQI_CEILING: u32 = 500;

/// A row of the NO2 breakpoint table: concentration range (ppb) to AQI range.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Breakpoint {
    pub c_low: f64,
    pub c_high: f64,
    pub aqi_low: u32,
    pub aqi_high: u32,
}

const fn breakpoint(c_low: f64, c_high: f64, aqi_low: u32, aqi_high: u32) -> Breakpoint {
    Breakpoint {
        c_low,
        c_high,
        aqi_low,
        aqi_high,
    }
}

pub static NO2_BREAKPOINTS: [Breakpoint; 6] = [
    breakpoint(0.0, 53.0, 0, 50),
    breakpoint(54.0, 100.0, 51, 100),
    breakpoint(101.0, 360.0, 101, 150),
    breakpoint(361.0, 649.0, 151, 200),
    breakpoint(650.0, 1249.0, 201, 300),
    breakpoint(1250.0, 2049.0, 301, 500),
];

impl Breakpoint {
    fn interpolate(&self, ppb: f64) -> u32 {
        let ppb = ppb.clamp(self.c_low, self.c_high);
        let span = f64::from(self.aqi_high - self.aqi_low);
        (span * (ppb - self.c_low) / (self.c_high - self.c_low) + f64::from(self.aqi_low)) as u32
    }
}

pub fn molecules_cm2_to_ppb(molecules_cm2: f64) -> f64 {
    molecules_cm2 / 1e15 * PPB_PER_1E15_MOLECULES
}

/// AQI for an NO2 concentration in ppb.
///
/// Values in the gap between two rows (e.g. 53.5) use the row above.
pub fn aqi_from_ppb(ppb: f64) -> u32 {
    if ppb.is_nan() || ppb <= 0.0 {
        return 0;
    }
    NO2_BREAKPOINTS
        .iter()
        .find(|row| ppb <= row.c_high)
        .map(|row| row.interpolate(ppb))
        .unwrap_or(AQI_CEILING)
}

/// An NO2 measurement expressed on the AQI scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct No2Reading {
    pub ppb: f64,
    pub aqi: u32,
    pub category: &'static AqiCategory,
}

impl No2Reading {
    pub fn from_ppb(ppb: f64) -> No2Reading {
        let aqi = aqi_from_ppb(ppb);
        No2Reading {
            ppb: (ppb * 100.0).round() / 100.0,
            aqi,
            category: classify(f64::from(aqi)),
        }
    }

    pub fn from_column_density(molecules_cm2: f64) -> No2Reading {
        No2Reading::from_ppb(molecules_cm2_to_ppb(molecules_cm2))
    }
}
